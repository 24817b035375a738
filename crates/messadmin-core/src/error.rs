//! Error types for mess admin operations.
//!
//! This module defines all error variants that can occur in the console,
//! from form validation to remote API failures. All errors use `thiserror`
//! and every one of them is recoverable at the UI level: the user may retry
//! the action that triggered it.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name as shown to the user (e.g. `email`).
    pub field: &'static str,

    /// Inline message shown next to the field.
    pub message: String,
}

/// Collected validation failures for one form submission.
///
/// Field order follows the order in which the form declares its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure for `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Returns `true` when no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Iterates over all recorded failures.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Converts into `Ok(())` when empty, or a validation error otherwise.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AdminError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Comprehensive error types for mess admin operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AdminError {
    // Validation errors
    /// One or more form fields are invalid; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    // Workflow errors
    /// No mess with the given id exists in the local collection.
    #[error("mess not found: {0}")]
    MessNotFound(String),

    /// A decision for this mess is still awaiting the server's answer.
    #[error("update already in progress for mess: {0}")]
    ActionInFlight(String),

    /// The mess is not in a state the requested decision applies to.
    #[error("invalid status transition for mess {id}: {from} to {to}")]
    InvalidTransition {
        /// Mess identifier.
        id: String,
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// A record from the server failed boundary validation.
    #[error("invalid mess record: {0}")]
    InvalidRecord(String),

    // Remote API errors
    /// The request never produced an HTTP response (connect, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a status other than 200.
    #[error("server responded with status {status}{}", status_suffix(.message))]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, when present.
        message: Option<String>,
    },

    /// The server answered 200 but the body was not what was expected.
    #[error("unexpected response: {0}")]
    Protocol(String),

    // Config errors
    /// Invalid configuration detected.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Error parsing configuration file.
    #[error("config parse error: {0}")]
    ConfigParseError(String),

    /// Configuration file not found at the expected location.
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    // Notification errors
    /// Rendering a notification template failed.
    #[error(transparent)]
    Notice(#[from] messadmin_notify::NoticeError),

    // IO and system errors
    /// Standard IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // Anyhow passthrough for rich context
    /// Generic error with context from anyhow.
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    // Generic fallback
    /// Unexpected error occurred.
    #[error("unexpected error: {0}")]
    Other(String),
}

impl AdminError {
    /// Returns `true` for failures of the remote call itself.
    ///
    /// These leave local state at its last known good value, and re-issuing
    /// the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AdminError::Transport(_) | AdminError::HttpStatus { .. } | AdminError::Protocol(_)
        )
    }
}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AdminError::HttpStatus {
                status: status.as_u16(),
                message: None,
            },
            None => AdminError::Transport(err.to_string()),
        }
    }
}

fn status_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Result type alias for mess admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_collect_in_order() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.push("email", "Invalid email format");
        errors.push("password", "Password must be at least 6 characters");

        assert_eq!(errors.get("email"), Some("Invalid email format"));
        assert_eq!(errors.get("name"), None);
        assert_eq!(
            errors.to_string(),
            "email: Invalid email format; password: Password must be at least 6 characters"
        );
        assert!(matches!(errors.into_result(), Err(AdminError::Validation(_))));
    }

    #[test]
    fn test_http_status_display() {
        let bare = AdminError::HttpStatus {
            status: 500,
            message: None,
        };
        assert_eq!(bare.to_string(), "server responded with status 500");

        let detailed = AdminError::HttpStatus {
            status: 401,
            message: Some("Invalid credentials".to_string()),
        };
        assert_eq!(
            detailed.to_string(),
            "server responded with status 401: Invalid credentials"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(AdminError::Transport("refused".into()).is_retryable());
        assert!(AdminError::HttpStatus { status: 502, message: None }.is_retryable());
        assert!(!AdminError::MessNotFound("9".into()).is_retryable());
        assert!(!AdminError::Validation(ValidationErrors::new()).is_retryable());
    }
}
