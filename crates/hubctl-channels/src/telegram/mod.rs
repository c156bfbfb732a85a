//! Telegram Bot API transport.
//!
//! Polls `getUpdates` and answers with `sendMessage`.
//! Docs: <https://core.telegram.org/bots/api>

mod polling;
mod send;
pub(crate) mod types;

#[cfg(test)]
mod tests;

/// Telegram's hard limit on message length.
const MAX_MESSAGE_LEN: usize = 4096;

/// Telegram transport using the Bot API.
pub struct TelegramTransport {
    client: reqwest::Client,
    base_url: String,
}

impl TelegramTransport {
    /// Create a transport for the given bot token.
    pub fn new(bot_token: &str) -> Self {
        Self::with_base_url(format!("https://api.telegram.org/bot{bot_token}"))
    }

    /// Create a transport against an arbitrary Bot API endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}
