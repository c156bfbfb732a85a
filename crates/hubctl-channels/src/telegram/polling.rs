//! Update fetching and the Transport trait implementation.

use super::types::{TgResponse, TgUpdate};
use super::TelegramTransport;
use async_trait::async_trait;
use hubctl_core::{
    error::HubError,
    message::{InboundEvent, Keyboard},
    traits::Transport,
};
use std::time::Duration;
use tracing::debug;

#[async_trait]
impl Transport for TelegramTransport {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn fetch_updates(&self, offset: i64) -> Result<Vec<InboundEvent>, HubError> {
        let url = format!("{}/getUpdates?offset={offset}", self.base_url);

        let resp = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(35))
            .send()
            .await
            .map_err(|e| HubError::Transport(format!("telegram poll failed: {e}")))?;

        let body: TgResponse<Vec<TgUpdate>> = resp
            .json()
            .await
            .map_err(|e| HubError::Transport(format!("telegram poll parse failed: {e}")))?;

        if !body.ok {
            return Err(HubError::Transport(format!(
                "telegram API error: {}",
                body.description.unwrap_or_default()
            )));
        }

        let events: Vec<InboundEvent> = body
            .result
            .unwrap_or_default()
            .into_iter()
            .map(TgUpdate::into_event)
            .collect();

        if !events.is_empty() {
            debug!("telegram: fetched {} updates from offset {offset}", events.len());
        }
        Ok(events)
    }

    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), HubError> {
        self.send_message(chat_id, text).await
    }

    async fn send_buttons(
        &self,
        chat_id: i64,
        caption: &str,
        keyboard: &Keyboard,
    ) -> Result<(), HubError> {
        self.send_keyboard(chat_id, caption, keyboard).await
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), HubError> {
        self.answer_callback_query(callback_id).await
    }

    async fn register_commands(&self) -> Result<(), HubError> {
        self.set_my_commands().await
    }
}
