//! Admin API adapter trait and payloads.

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Body of `POST {base}/admin/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST {base}/admin/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("contact", &self.contact)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `PATCH {base}/admin/password`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "currentPassword")]
    pub current_password: String,

    #[serde(rename = "newPassword")]
    pub new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordRequest")
            .field("current_password", &"<redacted>")
            .field("new_password", &"<redacted>")
            .finish()
    }
}

/// Body of `PATCH {base}/admin/config`: platform charges in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformConfig {
    pub gst: f64,

    #[serde(rename = "platformFee")]
    pub platform_fee: f64,
}

/// Admin adapter trait for account and platform settings endpoints.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Authenticates an admin.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::HttpStatus` when the server refuses the
    /// credentials, or `AdminError::Transport`.
    async fn login(&self, request: &LoginRequest) -> Result<()>;

    /// Creates an admin account.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::HttpStatus` or `AdminError::Transport`.
    async fn register(&self, request: &RegisterRequest) -> Result<()>;

    /// Replaces the signed-in admin's password.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::HttpStatus` when the server refuses the current
    /// password, or `AdminError::Transport`.
    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<()>;

    /// Updates the GST and platform fee percentages.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::HttpStatus` or `AdminError::Transport`.
    async fn update_platform_config(&self, config: &PlatformConfig) -> Result<()>;
}
