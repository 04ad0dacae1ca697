//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Assistant defaults
pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_COOLDOWN_SECONDS: u64 = 60;
pub const DEFAULT_NOW_WINDOW_MINUTES: i64 = 90;
pub const MAX_NOW_WINDOW_MINUTES: i64 = 7 * 24 * 60;
pub const DEFAULT_DISPLAY_TIMEZONE: &str = "UTC";

// Busy probe covers [now, now + 1 minute)
pub const BUSY_PROBE_WINDOW_SECONDS: i64 = 60;

// Collaborator call bounds
pub const DEFAULT_SOURCE_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_MAX_CONCURRENT_SOURCES: usize = 4;
pub const DEFAULT_TRANSLATION_TIMEOUT_SECONDS: u64 = 5;
pub const DEFAULT_PRESENCE_TIMEOUT_SECONDS: u64 = 5;

// Calendar payload coercion
pub const UNTITLED_EVENT_SUMMARY: &str = "Untitled Event";
pub const PRIMARY_CALENDAR_ID: &str = "primary";
