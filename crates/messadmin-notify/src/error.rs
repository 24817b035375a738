//! Error types for the notification crate.

use std::path::PathBuf;

/// Errors that can occur while rendering notifications.
#[derive(thiserror::Error, Debug)]
pub enum NoticeError {
    /// Template was found neither in the override directory nor built in.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Error occurred while rendering a template.
    #[error("template render error: {0}")]
    TemplateRenderError(String),

    /// A built-in or override template failed to compile.
    #[error("invalid template {name}: {reason}")]
    InvalidTemplate {
        /// Template name without extension.
        name: String,
        /// Compiler message from minijinja.
        reason: String,
    },

    /// Override directory does not exist or is not a directory.
    #[error("template directory not found: {0}")]
    TemplateDirectoryNotFound(PathBuf),

    /// Override directory listing failed.
    #[error("failed to list templates in {path}")]
    TemplateListError {
        /// Path to the template directory.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for notification operations.
pub type Result<T> = std::result::Result<T, NoticeError>;
