//! Calendar integration module
//!
//! Read-only access to Google Calendar for the event aggregator. Credential
//! acquisition happens elsewhere; the provider is handed a bearer token.

pub mod provider_impl;
pub mod providers;
pub mod types;

pub use providers::GoogleCalendarProvider;
