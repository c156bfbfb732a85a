//! Outbound Bot API calls.

use super::types::{TgReplyMarkup, TgResponse};
use super::{TelegramTransport, MAX_MESSAGE_LEN};
use hubctl_core::{error::HubError, message::Keyboard};
use tracing::info;

impl TelegramTransport {
    /// Send a text message, splitting it if it exceeds Telegram's limit.
    pub(super) async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), HubError> {
        for chunk in split_message(text, MAX_MESSAGE_LEN) {
            let body = serde_json::json!({
                "chat_id": chat_id,
                "text": chunk,
            });
            self.post("sendMessage", &body).await?;
        }
        Ok(())
    }

    /// Send a caption with an inline keyboard underneath.
    pub(super) async fn send_keyboard(
        &self,
        chat_id: i64,
        caption: &str,
        keyboard: &Keyboard,
    ) -> Result<(), HubError> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": caption,
            "reply_markup": TgReplyMarkup::from_keyboard(keyboard),
        });
        self.post("sendMessage", &body).await
    }

    pub(super) async fn answer_callback_query(&self, callback_id: &str) -> Result<(), HubError> {
        let body = serde_json::json!({ "callback_query_id": callback_id });
        self.post("answerCallbackQuery", &body).await
    }

    /// Register bot commands with Telegram so operators see an autocomplete menu.
    pub(super) async fn set_my_commands(&self) -> Result<(), HubError> {
        let commands = serde_json::json!({
            "commands": [
                { "command": "start", "description": "Choose your language" },
                { "command": "help", "description": "List available services" },
            ]
        });
        self.post("setMyCommands", &commands).await?;
        info!("registered Telegram bot commands");
        Ok(())
    }

    async fn post(&self, method: &str, body: &serde_json::Value) -> Result<(), HubError> {
        let url = format!("{}/{method}", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| HubError::Transport(format!("telegram {method} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp
                .json::<TgResponse<serde_json::Value>>()
                .await
                .ok()
                .and_then(|r| r.description)
                .unwrap_or_default();
            return Err(HubError::Transport(format!(
                "telegram {method} got {status}: {detail}"
            )));
        }
        Ok(())
    }
}

/// Split a long message into chunks that respect Telegram's limit.
///
/// Prefers breaking after a newline and never splits inside a UTF-8 sequence.
pub(super) fn split_message(text: &str, max_len: usize) -> Vec<&str> {
    if text.len() <= max_len {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + max_len).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            end = start + text[start..].chars().next().map_or(1, char::len_utf8);
        }
        let break_at = if end < text.len() {
            text[start..end]
                .rfind('\n')
                .map(|i| start + i + 1)
                .unwrap_or(end)
        } else {
            end
        };
        chunks.push(&text[start..break_at]);
        start = break_at;
    }

    chunks
}
