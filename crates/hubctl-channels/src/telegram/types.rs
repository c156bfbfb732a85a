//! Telegram Bot API wire types.

use hubctl_core::message::{EventKind, InboundEvent, Keyboard};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgUpdate {
    pub update_id: i64,
    pub message: Option<TgMessage>,
    pub callback_query: Option<TgCallbackQuery>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub(crate) struct TgMessage {
    pub message_id: i64,
    pub from: Option<TgUser>,
    pub chat: TgChat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgCallbackQuery {
    pub id: String,
    /// The message the keyboard was attached to. Absent for very old messages.
    pub message: Option<TgMessage>,
    pub data: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub(crate) struct TgUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgChat {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct TgInlineButton<'a> {
    pub text: &'a str,
    pub callback_data: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TgReplyMarkup<'a> {
    pub inline_keyboard: Vec<Vec<TgInlineButton<'a>>>,
}

impl<'a> TgReplyMarkup<'a> {
    pub fn from_keyboard(keyboard: &'a Keyboard) -> Self {
        Self {
            inline_keyboard: keyboard
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|b| TgInlineButton {
                            text: &b.label,
                            callback_data: &b.payload,
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

impl TgUpdate {
    /// Flatten into a transport-neutral event.
    ///
    /// Callbacks win over messages. A callback with no payload or no
    /// originating message, and a message with no text, become
    /// [`EventKind::Other`].
    pub fn into_event(self) -> InboundEvent {
        let kind = match (self.callback_query, self.message) {
            (Some(cb), _) => match (cb.data, cb.message) {
                (Some(data), Some(msg)) if !data.is_empty() => EventKind::Callback {
                    callback_id: cb.id,
                    chat_id: msg.chat.id,
                    data,
                },
                _ => EventKind::Other,
            },
            (None, Some(msg)) => match msg.text {
                Some(text) => EventKind::Message {
                    sender_id: msg.from.map(|u| u.id).unwrap_or(msg.chat.id),
                    chat_id: msg.chat.id,
                    text,
                },
                None => EventKind::Other,
            },
            (None, None) => EventKind::Other,
        };
        InboundEvent {
            sequence: self.update_id,
            kind,
        }
    }
}
