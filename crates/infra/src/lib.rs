//! # AwayDesk Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client shared by every adapter
//! - External service integrations (Google Calendar, Google Translate,
//!   presence)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `awaydesk-core`
//! - Contains all "impure" code (I/O, environment, files)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::calendar::GoogleCalendarProvider;
pub use integrations::presence::{HttpPresenceClient, UnknownPresence};
pub use integrations::translation::{GoogleTranslateClient, PassthroughTranslator};
