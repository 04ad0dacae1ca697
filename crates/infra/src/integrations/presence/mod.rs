//! Presence integration module

pub mod http;

pub use http::{HttpPresenceClient, UnknownPresence};
