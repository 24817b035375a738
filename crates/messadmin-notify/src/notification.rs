//! Rendered notifications.

use serde::Serialize;
use std::fmt;

/// Severity of a notification, mirrored by how a front end styles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// The requested action completed.
    Success,

    /// The requested action failed; the user may retry it.
    Error,

    /// Neutral progress or status information.
    Info,
}

impl NoticeLevel {
    /// Returns the lowercase label used in logs and terminal output.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Error => "error",
            NoticeLevel::Info => "info",
        }
    }
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-facing message produced after a workflow finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// How the message should be presented.
    pub level: NoticeLevel,

    /// Rendered message text.
    pub message: String,
}

impl Notification {
    /// Creates a notification from already rendered text.
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Shorthand for an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// Returns `true` for error notifications.
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
