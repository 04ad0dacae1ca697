//! Transport-facing message shapes.

use serde::{Deserialize, Serialize};

/// Kind of conversation a message arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    Private,
    Group,
}

/// A message delivered by the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessage {
    pub sender_id: String,
    pub text: String,
    pub chat_kind: ChatKind,
    /// Conversation the reply is addressed to; defaults to the sender.
    #[serde(default)]
    pub conversation_id: Option<String>,
}

impl InboundMessage {
    /// Private message whose reply goes back to the sender.
    pub fn private(sender_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            text: text.into(),
            chat_kind: ChatKind::Private,
            conversation_id: None,
        }
    }

    pub fn is_private(&self) -> bool {
        self.chat_kind == ChatKind::Private
    }

    pub fn reply_target(&self) -> &str {
        self.conversation_id.as_deref().unwrap_or(&self.sender_id)
    }
}

/// A single text reply addressed to the triggering conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundReply {
    pub conversation_id: String,
    pub text: String,
}

/// Owner presence on the messaging transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    pub online: bool,
}

impl Presence {
    pub fn online() -> Self {
        Self { online: true }
    }

    pub fn offline() -> Self {
        Self { online: false }
    }
}
