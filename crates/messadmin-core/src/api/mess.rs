//! Mess API adapter trait and payloads.

use crate::error::Result;
use crate::model::{MessBatch, VerificationStatus};
use async_trait::async_trait;
use serde::Serialize;

/// Body of `PATCH {base}/mess/update/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRequest {
    /// New verification status.
    #[serde(rename = "isVerified")]
    pub status: VerificationStatus,

    /// Reason for a rejection; sent as `null` otherwise.
    #[serde(rename = "rejectionReason")]
    pub rejection_reason: Option<String>,
}

/// Mess adapter trait.
///
/// Defines the two calls the verification workflow makes against the
/// backend. Implementations must treat every status other than 200 as a
/// failure.
#[async_trait]
pub trait MessApi: Send + Sync {
    /// Retrieves the full mess collection (`GET {base}/mess/all`).
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Transport` when no response arrives,
    /// `AdminError::HttpStatus` for a non-200 answer, and
    /// `AdminError::Protocol` when the body is not a mess list.
    async fn fetch_all(&self) -> Result<MessBatch>;

    /// Applies a partial status update to one mess
    /// (`PATCH {base}/mess/update/{id}`).
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Transport` or `AdminError::HttpStatus`.
    async fn update_status(&self, id: &str, request: &UpdateRequest) -> Result<()>;
}
