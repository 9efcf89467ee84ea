mod common;

use common::temp_config;
use fraudboard::config::{AuthType, Config, ConfigError};

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.base_url, "http://localhost:8080/api");
    assert_eq!(config.api.timeout_seconds, None);
    assert_eq!(config.api.connect_timeout_seconds, None);
    assert_eq!(config.api.auth_type(), AuthType::None);
    assert_eq!(config.cache.stale_time_ms, 0);
    assert_eq!(config.display.page_size, 20);
    assert_eq!(config.display.recent_limit, 10);
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("fraudboard/config.toml"));
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_full_file() {
    let (_dir, path) = temp_config(
        r#"
[api]
base_url = "https://fraud.example.com/api"
timeout_seconds = 15
connect_timeout_seconds = 3
auth_type = "bearer"
api_key = "secret-token"

[cache]
stale_time_ms = 30000

[display]
page_size = 50
recent_limit = 5
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "https://fraud.example.com/api");
    assert_eq!(config.api.timeout_seconds, Some(15));
    assert_eq!(config.api.connect_timeout_seconds, Some(3));
    assert_eq!(config.api.auth_type(), AuthType::Bearer);
    assert_eq!(config.cache.stale_time_ms, 30000);
    assert_eq!(config.display.page_size, 50);
    assert_eq!(config.display.recent_limit, 5);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let (_dir, path) = temp_config(
        r#"
[display]
page_size = 10
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.display.page_size, 10);
    assert_eq!(config.display.recent_limit, 10);
    assert_eq!(config.api.base_url, "http://localhost:8080/api");
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let (_dir, path) = temp_config("[api\nbase_url = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_invalid_url_is_validation_error() {
    let (_dir, path) = temp_config(
        r#"
[api]
base_url = "ftp://fraud.example.com"
"#,
    );
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("http or https"));
}

#[test]
fn test_zero_recent_limit_rejected() {
    let (_dir, path) = temp_config(
        r#"
[display]
recent_limit = 0
"#,
    );
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_env_override_applies_after_file() {
    let (_dir, path) = temp_config(
        r#"
[api]
base_url = "http://file.example.com/api"
"#,
    );
    let mut config = Config::load_from(&path).unwrap();
    config.apply_env_overrides(Some("http://env.example.com/api".to_string()));
    assert_eq!(config.api.base_url, "http://env.example.com/api");
    assert!(config.validate().is_ok());
}
