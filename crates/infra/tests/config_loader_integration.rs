//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use awaydesk_infra::config;
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
        "assistant": {
            "owner_user_id": "99",
            "owner_display_name": "Simone",
            "calendar_source_ids": ["primary", "family"],
            "max_results": 8,
            "cooldown_seconds": 30,
            "display_timezone": "America/New_York",
            "source_timeout_seconds": 3,
            "max_concurrent_sources": 2
        },
        "calendar": {
            "access_token": "token-123"
        },
        "translation": {
            "enabled": true,
            "timeout_seconds": 2
        },
        "presence": {
            "base_url": "http://presence.local"
        }
    }"#,
        "json",
    );

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_ok(), "Failed to load config from JSON file: {:?}", result.err());

    let config = result.unwrap();
    assert_eq!(config.assistant.owner_user_id, "99");
    assert_eq!(config.assistant.calendar_source_ids, vec!["primary", "family"]);
    assert_eq!(config.assistant.max_results, 8);
    assert_eq!(config.assistant.cooldown_seconds, 30);
    assert_eq!(config.assistant.source_timeout().as_secs(), 3);
    assert_eq!(config.assistant.max_concurrent_sources, 2);
    assert_eq!(config.assistant.timezone().unwrap(), chrono_tz::America::New_York);
    assert_eq!(config.calendar.access_token, "token-123");
    assert_eq!(config.translation.timeout_seconds, 2);
    assert_eq!(config.presence.base_url.as_deref(), Some("http://presence.local"));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_with_minimal_fields() {
    let path = write_config(
        r#"
[assistant]
owner_user_id = "99"
owner_display_name = "Simone"
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("minimal config loads");

    assert_eq!(config.assistant.calendar_source_ids, vec!["primary"]);
    assert_eq!(config.assistant.max_results, 10);
    assert_eq!(config.assistant.cooldown_seconds, 60);
    assert_eq!(config.assistant.now_window_minutes, 90);
    assert_eq!(config.assistant.display_timezone, "UTC");
    assert!(config.translation.enabled);
    assert!(config.presence.base_url.is_none());
    assert!(config.calendar.access_token.is_empty());

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_missing_owner_fails() {
    let path = write_config(
        r#"
[assistant]
owner_display_name = "Simone"
"#,
        "toml",
    );

    assert!(config::load_from_file(Some(path.clone())).is_err());

    std::fs::remove_file(path).ok();
}
