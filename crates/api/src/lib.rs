//! # AwayDesk API
//!
//! Application layer - wiring, transport, and main entry point.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - The line-delimited JSON console transport
//! - Logging initialisation
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod context;
pub mod transport;
pub mod utils;

// Re-export for convenience
pub use context::*;
pub use transport::console::{reply_channel, serve, write_replies, ChannelReplySink, ServeStats};
