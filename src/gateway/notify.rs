//! Notifier: outbound replies. Failures are logged and otherwise ignored.

use super::Gateway;
use crate::i18n;
use hubctl_core::message::{Button, Keyboard};
use tracing::{debug, warn};

/// Locales offered by the picker, as (flag, payload).
pub(super) const LOCALE_CHOICES: [(&str, &str); 2] = [("🇮🇹", "it"), ("🇬🇧", "en")];

/// Caption shown above the language picker.
pub(super) const PICKER_CAPTION: &str = "ㅤㅤ( ﾉ ﾟｰﾟ)ﾉ";

impl Gateway {
    pub(super) async fn send_text(&self, chat_id: i64, text: &str) {
        debug!("replying to {chat_id}");
        if let Err(e) = self.transport.send_text(chat_id, text).await {
            warn!("error sending message to {chat_id}: {e}");
        }
    }

    /// Send the one-row language picker.
    pub(super) async fn send_locale_buttons(&self, chat_id: i64, caption: &str) {
        let keyboard: Keyboard = vec![LOCALE_CHOICES
            .iter()
            .map(|(flag, payload)| Button::new(*flag, *payload))
            .collect()];
        if let Err(e) = self
            .transport
            .send_buttons(chat_id, caption, &keyboard)
            .await
        {
            warn!("error sending language picker to {chat_id}: {e}");
        }
    }

    /// Send the localized message `key` to an operator.
    pub(super) async fn reply(&self, chat_id: i64, key: &str) {
        let text = {
            let state = self.store.read().await;
            i18n::localize(&state, chat_id, key)
        };
        self.send_text(chat_id, &text).await;
    }

    /// Send the message `key` in `locale`, whatever the operator's stored
    /// locale is by the time the reply is rendered.
    pub(super) async fn reply_in(&self, chat_id: i64, locale: &str, key: &str) {
        let text = {
            let state = self.store.read().await;
            i18n::localize_in(&state, chat_id, locale, key)
        };
        self.send_text(chat_id, &text).await;
    }
}
