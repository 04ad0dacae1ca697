//! Configuration structures
//!
//! Loaded by `awaydesk-infra::config` from the environment or a JSON/TOML
//! file. Every optional knob has a serde default so minimal files work.

use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COOLDOWN_SECONDS, DEFAULT_DISPLAY_TIMEZONE, DEFAULT_MAX_CONCURRENT_SOURCES,
    DEFAULT_MAX_RESULTS, DEFAULT_NOW_WINDOW_MINUTES, DEFAULT_PRESENCE_TIMEOUT_SECONDS,
    DEFAULT_SOURCE_TIMEOUT_SECONDS, DEFAULT_TRANSLATION_TIMEOUT_SECONDS, MAX_NOW_WINDOW_MINUTES,
    PRIMARY_CALENDAR_ID,
};
use crate::errors::{AwayDeskError, Result};

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub presence: PresenceConfig,
}

impl Config {
    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.assistant.validate()
    }
}

/// Options governing how the assistant answers on the owner's behalf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub owner_user_id: String,
    pub owner_display_name: String,
    #[serde(default = "default_sources")]
    pub calendar_source_ids: Vec<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,
    #[serde(default = "default_now_window_minutes")]
    pub now_window_minutes: i64,
    #[serde(default = "default_display_timezone")]
    pub display_timezone: String,
    #[serde(default = "default_source_timeout_seconds")]
    pub source_timeout_seconds: u64,
    #[serde(default = "default_max_concurrent_sources")]
    pub max_concurrent_sources: usize,
}

impl AssistantConfig {
    /// Config with every optional knob at its default.
    pub fn new(owner_user_id: impl Into<String>, owner_display_name: impl Into<String>) -> Self {
        Self {
            owner_user_id: owner_user_id.into(),
            owner_display_name: owner_display_name.into(),
            calendar_source_ids: default_sources(),
            max_results: DEFAULT_MAX_RESULTS,
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
            now_window_minutes: DEFAULT_NOW_WINDOW_MINUTES,
            display_timezone: default_display_timezone(),
            source_timeout_seconds: DEFAULT_SOURCE_TIMEOUT_SECONDS,
            max_concurrent_sources: DEFAULT_MAX_CONCURRENT_SOURCES,
        }
    }

    /// Replace the ordered list of calendar sources.
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.calendar_source_ids = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Parse `display_timezone` as an IANA zone name.
    pub fn timezone(&self) -> Result<Tz> {
        self.display_timezone.parse::<Tz>().map_err(|e| {
            AwayDeskError::Config(format!("Unknown timezone '{}': {}", self.display_timezone, e))
        })
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_seconds)
    }

    /// Minimum gap between two busy notices.
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_seconds)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.owner_user_id.trim().is_empty() {
            return Err(AwayDeskError::Config("owner_user_id must not be empty".into()));
        }
        if self.calendar_source_ids.iter().all(|s| s.trim().is_empty()) {
            return Err(AwayDeskError::Config(
                "calendar_source_ids must name at least one calendar".into(),
            ));
        }
        if self.max_results == 0 {
            return Err(AwayDeskError::Config("max_results must be at least 1".into()));
        }
        if self.now_window_minutes <= 0 || self.now_window_minutes > MAX_NOW_WINDOW_MINUTES {
            return Err(AwayDeskError::Config(format!(
                "now_window_minutes must be between 1 and {MAX_NOW_WINDOW_MINUTES}"
            )));
        }
        if self.max_concurrent_sources == 0 {
            return Err(AwayDeskError::Config("max_concurrent_sources must be at least 1".into()));
        }
        self.timezone().map(|_| ())
    }
}

/// Calendar Query Service connection settings
///
/// The access token is an already-authorized bearer credential; acquiring or
/// refreshing it happens outside this application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_calendar_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub access_token: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self { base_url: default_calendar_base_url(), access_token: String::new() }
    }
}

/// Translation Service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_translation_base_url")]
    pub base_url: String,
    #[serde(default = "default_translation_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_translation_base_url(),
            timeout_seconds: DEFAULT_TRANSLATION_TIMEOUT_SECONDS,
        }
    }
}

/// Presence Service settings
///
/// Without a `base_url` the owner's presence is always unknown, which the
/// decision engine treats as offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_presence_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self { base_url: None, timeout_seconds: DEFAULT_PRESENCE_TIMEOUT_SECONDS }
    }
}

fn default_sources() -> Vec<String> {
    vec![PRIMARY_CALENDAR_ID.to_string()]
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_cooldown_seconds() -> u64 {
    DEFAULT_COOLDOWN_SECONDS
}

fn default_now_window_minutes() -> i64 {
    DEFAULT_NOW_WINDOW_MINUTES
}

fn default_display_timezone() -> String {
    DEFAULT_DISPLAY_TIMEZONE.to_string()
}

fn default_source_timeout_seconds() -> u64 {
    DEFAULT_SOURCE_TIMEOUT_SECONDS
}

fn default_max_concurrent_sources() -> usize {
    DEFAULT_MAX_CONCURRENT_SOURCES
}

fn default_calendar_base_url() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

fn default_translation_base_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_translation_timeout_seconds() -> u64 {
    DEFAULT_TRANSLATION_TIMEOUT_SECONDS
}

fn default_presence_timeout_seconds() -> u64 {
    DEFAULT_PRESENCE_TIMEOUT_SECONDS
}

fn default_true() -> bool {
    true
}
