//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If a required one is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is validated before it is returned.
//!
//! ## Environment Variables
//! Required:
//! - `AWAYDESK_OWNER_USER_ID`: Chat identity of the owner
//! - `AWAYDESK_OWNER_DISPLAY_NAME`: Name used in replies
//!
//! Optional (defaults in parentheses):
//! - `AWAYDESK_CALENDAR_SOURCE_IDS`: Comma-separated calendar ids (`primary`)
//! - `AWAYDESK_MAX_RESULTS` (10), `AWAYDESK_COOLDOWN_SECONDS` (60),
//!   `AWAYDESK_NOW_WINDOW_MINUTES` (90)
//! - `AWAYDESK_DISPLAY_TIMEZONE`: IANA zone name (`UTC`)
//! - `AWAYDESK_SOURCE_TIMEOUT_SECONDS` (10),
//!   `AWAYDESK_MAX_CONCURRENT_SOURCES` (4)
//! - `AWAYDESK_CALENDAR_BASE_URL`, `AWAYDESK_CALENDAR_ACCESS_TOKEN`
//! - `AWAYDESK_TRANSLATION_ENABLED` (true), `AWAYDESK_TRANSLATION_BASE_URL`,
//!   `AWAYDESK_TRANSLATION_TIMEOUT_SECONDS` (5)
//! - `AWAYDESK_PRESENCE_BASE_URL`, `AWAYDESK_PRESENCE_TIMEOUT_SECONDS` (5)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./awaydesk.json` or `./awaydesk.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use awaydesk_domain::{
    AssistantConfig, AwayDeskError, CalendarConfig, Config, PresenceConfig, Result,
    TranslationConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `AwayDeskError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing or values fail validation
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `AwayDeskError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let owner_user_id = env_var("AWAYDESK_OWNER_USER_ID")?;
    let owner_display_name = env_var("AWAYDESK_OWNER_DISPLAY_NAME")?;

    let mut assistant = AssistantConfig::new(owner_user_id, owner_display_name);
    if let Ok(sources) = std::env::var("AWAYDESK_CALENDAR_SOURCE_IDS") {
        assistant = assistant.with_sources(
            sources.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string),
        );
    }
    assistant.max_results = env_parse("AWAYDESK_MAX_RESULTS", assistant.max_results)?;
    assistant.cooldown_seconds = env_parse("AWAYDESK_COOLDOWN_SECONDS", assistant.cooldown_seconds)?;
    assistant.now_window_minutes =
        env_parse("AWAYDESK_NOW_WINDOW_MINUTES", assistant.now_window_minutes)?;
    assistant.display_timezone =
        std::env::var("AWAYDESK_DISPLAY_TIMEZONE").unwrap_or(assistant.display_timezone);
    assistant.source_timeout_seconds =
        env_parse("AWAYDESK_SOURCE_TIMEOUT_SECONDS", assistant.source_timeout_seconds)?;
    assistant.max_concurrent_sources =
        env_parse("AWAYDESK_MAX_CONCURRENT_SOURCES", assistant.max_concurrent_sources)?;

    let calendar_defaults = CalendarConfig::default();
    let calendar = CalendarConfig {
        base_url: std::env::var("AWAYDESK_CALENDAR_BASE_URL")
            .unwrap_or(calendar_defaults.base_url),
        access_token: std::env::var("AWAYDESK_CALENDAR_ACCESS_TOKEN")
            .unwrap_or(calendar_defaults.access_token),
    };

    let translation_defaults = TranslationConfig::default();
    let translation = TranslationConfig {
        enabled: env_bool("AWAYDESK_TRANSLATION_ENABLED", translation_defaults.enabled),
        base_url: std::env::var("AWAYDESK_TRANSLATION_BASE_URL")
            .unwrap_or(translation_defaults.base_url),
        timeout_seconds: env_parse(
            "AWAYDESK_TRANSLATION_TIMEOUT_SECONDS",
            translation_defaults.timeout_seconds,
        )?,
    };

    let presence_defaults = PresenceConfig::default();
    let presence = PresenceConfig {
        base_url: std::env::var("AWAYDESK_PRESENCE_BASE_URL").ok().filter(|s| !s.is_empty()),
        timeout_seconds: env_parse(
            "AWAYDESK_PRESENCE_TIMEOUT_SECONDS",
            presence_defaults.timeout_seconds,
        )?,
    };

    let config = Config { assistant, calendar, translation, presence };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `AwayDeskError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing or values fail validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AwayDeskError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            AwayDeskError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AwayDeskError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AwayDeskError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AwayDeskError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AwayDeskError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("awaydesk.json"),
        dir.join("awaydesk.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `AwayDeskError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty()).ok_or_else(|| {
        AwayDeskError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable, falling back to `default`.
///
/// # Errors
/// Returns `AwayDeskError::Config` if the variable is set but does not parse.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AwayDeskError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
