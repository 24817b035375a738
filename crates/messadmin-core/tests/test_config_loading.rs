//! Integration tests for configuration loading.
//!
//! Tests TOML parsing, defaults and validation of loaded values.

use messadmin_core::config::{DEFAULT_API_BASE_URL, DEFAULT_REJECTION_REASON};
use messadmin_core::{AdminConfig, AdminError};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_config_load_defaults_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("messadmin.toml");

    let config = AdminConfig::load(&path).unwrap();

    assert_eq!(config.api_base_url.as_str(), DEFAULT_API_BASE_URL);
    assert_eq!(config.request_timeout, Duration::from_secs(15));
    assert_eq!(config.default_rejection_reason, DEFAULT_REJECTION_REASON);
    assert_eq!(config.template_dir, None);
    assert_eq!(config.config_file, Some(path));
}

#[test]
fn test_config_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("messadmin.toml");

    let content = r#"
[api]
base_url = "https://api.livmeal.in/api/v1"
timeout_secs = 30

[verification]
default_rejection_reason = "Documents could not be verified."

[notifications]
template_dir = "notices"
"#;
    fs::write(&path, content).unwrap();

    let config = AdminConfig::load(&path).unwrap();

    assert_eq!(config.api_base_url.as_str(), "https://api.livmeal.in/api/v1");
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(config.default_rejection_reason, "Documents could not be verified.");
    assert_eq!(config.template_dir, Some(temp_dir.path().join("notices")));
}

#[test]
fn test_config_partial_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("messadmin.toml");
    fs::write(&path, "[api]\ntimeout_secs = 5\n").unwrap();

    let config = AdminConfig::load(&path).unwrap();

    assert_eq!(config.api_base_url.as_str(), DEFAULT_API_BASE_URL);
    assert_eq!(config.request_timeout, Duration::from_secs(5));
}

#[test]
fn test_config_invalid_toml_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("messadmin.toml");
    fs::write(&path, "invalid { toml").unwrap();

    let result = AdminConfig::load(&path);
    assert!(matches!(result, Err(AdminError::ConfigParseError(_))));
}

#[test]
fn test_config_invalid_values_fail() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("messadmin.toml");

    fs::write(&path, "[api]\nbase_url = \"ftp://files.example\"\n").unwrap();
    assert!(matches!(AdminConfig::load(&path), Err(AdminError::InvalidConfig(_))));

    fs::write(&path, "[api]\ntimeout_secs = 0\n").unwrap();
    assert!(matches!(AdminConfig::load(&path), Err(AdminError::InvalidConfig(_))));

    fs::write(&path, "[verification]\ndefault_rejection_reason = \"  \"\n").unwrap();
    assert!(matches!(AdminConfig::load(&path), Err(AdminError::InvalidConfig(_))));
}

#[test]
fn test_flag_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("messadmin.toml");
    fs::write(&path, "[api]\nbase_url = \"http://file.example/api\"\n").unwrap();

    let config = AdminConfig::load(&path)
        .unwrap()
        .with_api_base_url("http://flag.example/api/v1")
        .unwrap();

    assert_eq!(config.api_base_url.as_str(), "http://flag.example/api/v1");
}
