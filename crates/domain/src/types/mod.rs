//! Domain types and models

pub mod decision;
pub mod event;
pub mod message;
pub mod window;

pub use decision::{DecisionOutcome, NoReplyReason};
pub use event::{AggregatedResult, Event, EventTime};
pub use message::{ChatKind, InboundMessage, OutboundReply, Presence};
pub use window::ResolvedWindow;
