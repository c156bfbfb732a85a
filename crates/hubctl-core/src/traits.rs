use crate::{
    error::HubError,
    message::{InboundEvent, Keyboard},
};
use async_trait::async_trait;

/// Messaging transport trait: where commands come from and replies go.
///
/// The Telegram Bot API implements this; tests substitute an in-memory
/// recorder.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Human-readable transport name.
    fn name(&self) -> &str;

    /// Fetch the next batch of events starting at `offset`.
    async fn fetch_updates(&self, offset: i64) -> Result<Vec<InboundEvent>, HubError>;

    /// Send a plain text message.
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), HubError>;

    /// Send a message with an inline keyboard.
    async fn send_buttons(
        &self,
        chat_id: i64,
        caption: &str,
        keyboard: &Keyboard,
    ) -> Result<(), HubError>;

    /// Acknowledge a button press so the client stops its progress indicator.
    async fn answer_callback(&self, _callback_id: &str) -> Result<(), HubError> {
        Ok(())
    }

    /// Advertise bot commands to clients. Best-effort.
    async fn register_commands(&self) -> Result<(), HubError> {
        Ok(())
    }
}

/// Runs service control scripts with elevated privileges.
#[async_trait]
pub trait ScriptExecutor: Send + Sync {
    /// Run `path` immediately followed by `script` (no separator inserted).
    ///
    /// Any launch failure or non-zero exit is an error.
    async fn run(&self, path: &str, script: &str) -> Result<(), HubError>;
}
