//! Configuration types for the mess admin console.
//!
//! The API base location is an explicit value injected into the runtime at
//! construction. Nothing in the library reads process environment; the
//! binary resolves flags, environment and the optional TOML file once at
//! startup and hands the result in.

use crate::error::{AdminError, Result};
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Base URL used when neither the config file nor the command line sets one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3500/api/v1";

/// Config file name looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "messadmin.toml";

/// Explanation sent with a rejection when the admin does not supply one.
pub const DEFAULT_REJECTION_REASON: &str =
    "Your mess registration did not meet our verification requirements. Please review your details and apply again.";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Main console configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Base location of the REST API (e.g. `http://localhost:3500/api/v1`).
    pub api_base_url: Url,

    /// Upper bound on a single HTTP request, so a hung request always
    /// releases the loading indicator.
    pub request_timeout: Duration,

    /// Reason attached to rejections that do not carry their own.
    pub default_rejection_reason: String,

    /// Directory with notification template overrides.
    pub template_dir: Option<PathBuf>,

    /// File this configuration was loaded from, if any.
    pub config_file: Option<PathBuf>,
}

impl AdminConfig {
    /// Creates a configuration with default settings for the given API base.
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            default_rejection_reason: DEFAULT_REJECTION_REASON.to_string(),
            template_dir: None,
            config_file: None,
        }
    }

    /// Creates a default configuration from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidConfig` if the URL is not an absolute
    /// `http`/`https` URL.
    pub fn from_base_url(base: &str) -> Result<Self> {
        Ok(Self::new(parse_base_url(base)?))
    }

    /// Loads configuration from a TOML file, falling back to defaults.
    ///
    /// A missing file is not an error: the defaults are returned with
    /// `config_file` still pointing at `path`. Relative `template_dir`
    /// entries are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::ConfigParseError` for malformed TOML and
    /// `AdminError::InvalidConfig` for values that parse but make no sense.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_base_url(DEFAULT_API_BASE_URL)?;
        config.config_file = Some(path.to_path_buf());

        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content)
            .map_err(|e| AdminError::ConfigParseError(format!("{}: {e}", path.display())))?;

        if let Some(base) = file.api.base_url.as_deref() {
            config.api_base_url = parse_base_url(base)?;
        }

        if let Some(secs) = file.api.timeout_secs {
            if secs == 0 {
                return Err(AdminError::InvalidConfig(
                    "api.timeout_secs must be greater than zero".to_string(),
                ));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(reason) = file.verification.default_rejection_reason {
            config = config.with_rejection_reason(reason)?;
        }

        if let Some(dir) = file.notifications.template_dir {
            let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
            config.template_dir = Some(base_dir.join(dir));
        }

        tracing::debug!(path = %path.display(), base_url = %config.api_base_url, "loaded config file");
        Ok(config)
    }

    /// Replaces the API base URL.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidConfig` if the URL is unusable.
    pub fn with_api_base_url(mut self, base: &str) -> Result<Self> {
        self.api_base_url = parse_base_url(base)?;
        Ok(self)
    }

    /// Replaces the default rejection reason.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidConfig` for a blank reason.
    pub fn with_rejection_reason(mut self, reason: impl Into<String>) -> Result<Self> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(AdminError::InvalidConfig(
                "default rejection reason must not be empty".to_string(),
            ));
        }
        self.default_rejection_reason = reason;
        Ok(self)
    }
}

/// Parses and validates an API base URL.
///
/// # Errors
///
/// Returns `AdminError::InvalidConfig` unless the URL is absolute and uses
/// `http` or `https`.
pub fn parse_base_url(base: &str) -> Result<Url> {
    let url = Url::parse(base.trim())
        .map_err(|e| AdminError::InvalidConfig(format!("invalid api base url {base:?}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(AdminError::InvalidConfig(format!(
            "api base url must be an http(s) url: {base}"
        )));
    }

    Ok(url)
}

/// On-disk shape of `messadmin.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiSection,
    verification: VerificationSection,
    notifications: NotificationSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiSection {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VerificationSection {
    default_rejection_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NotificationSection {
    template_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdminConfig::from_base_url(DEFAULT_API_BASE_URL).unwrap();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:3500/api/v1");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.default_rejection_reason, DEFAULT_REJECTION_REASON);
        assert!(config.template_dir.is_none());
    }

    #[test]
    fn test_rejects_non_http_base() {
        assert!(matches!(
            parse_base_url("ftp://example.com/api"),
            Err(AdminError::InvalidConfig(_))
        ));
        assert!(matches!(
            parse_base_url("not a url"),
            Err(AdminError::InvalidConfig(_))
        ));
        assert!(parse_base_url("https://api.example.com/api/v1/").is_ok());
    }

    #[test]
    fn test_blank_rejection_reason_is_invalid() {
        let config = AdminConfig::from_base_url(DEFAULT_API_BASE_URL).unwrap();
        assert!(config.with_rejection_reason("   ").is_err());
    }
}
