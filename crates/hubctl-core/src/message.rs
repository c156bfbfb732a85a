use serde::{Deserialize, Serialize};

/// An inbound event pulled from the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Strictly increasing sequence number used to advance the poll cursor.
    pub sequence: i64,
    pub kind: EventKind,
}

/// What the operator did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A plain text message.
    Message {
        sender_id: i64,
        chat_id: i64,
        text: String,
    },
    /// A button press on a previously sent inline keyboard.
    Callback {
        /// Transport id of the callback, used for acknowledgement.
        callback_id: String,
        /// Chat of the message that carried the keyboard.
        chat_id: i64,
        data: String,
    },
    /// Anything else the transport delivers (edits, stickers, joins).
    /// Carried only so the poll cursor moves past it.
    Other,
}

impl InboundEvent {
    /// The conversation that should be authorized and answered.
    pub fn chat_id(&self) -> Option<i64> {
        match &self.kind {
            EventKind::Message { chat_id, .. } | EventKind::Callback { chat_id, .. } => {
                Some(*chat_id)
            }
            EventKind::Other => None,
        }
    }
}

/// A single inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    /// Payload echoed back in the callback when pressed.
    pub payload: String,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Rows of buttons rendered under a message.
pub type Keyboard = Vec<Vec<Button>>;
