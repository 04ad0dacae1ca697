//! Outcomes of evaluating one inbound message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::AggregatedResult;

/// Why the engine decided to stay silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoReplyReason {
    /// The owner wrote the message.
    OwnMessage,
    /// Group chats are never answered.
    GroupChat,
    /// No explicit date and nothing on the calendar right now.
    NotBusy,
    /// Owner is in an event but reachable on the transport.
    OwnerOnline,
    /// A busy notice went out less than `cooldown_seconds` ago.
    CooldownActive,
}

/// Reply action chosen for a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DecisionOutcome {
    ReplySchedule { events: AggregatedResult },
    ReplyNoEvents,
    ReplyBusy { until: DateTime<Utc> },
    NoReply { reason: NoReplyReason },
}

impl DecisionOutcome {
    pub fn no_reply(reason: NoReplyReason) -> Self {
        Self::NoReply { reason }
    }

    pub fn is_reply(&self) -> bool {
        !matches!(self, Self::NoReply { .. })
    }

    /// Stable label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ReplySchedule { .. } => "reply_schedule",
            Self::ReplyNoEvents => "reply_no_events",
            Self::ReplyBusy { .. } => "reply_busy",
            Self::NoReply { .. } => "no_reply",
        }
    }
}
