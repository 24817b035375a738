//! Mock mess adapter for testing.
//!
//! This module provides a mock implementation of the `MessApi` trait that
//! serves an in-memory collection, applies successful updates to it like
//! the real backend would, and records every call.

use crate::api::mess::{MessApi, UpdateRequest};
use crate::error::{AdminError, Result};
use crate::model::{MessBatch, MessRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Failure a mock call can be programmed to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Server answered with this HTTP status.
    Status(u16),

    /// No response arrived (connection refused, timeout).
    Transport,
}

impl MockFailure {
    fn to_error(self) -> AdminError {
        match self {
            MockFailure::Status(status) => AdminError::HttpStatus {
                status,
                message: None,
            },
            MockFailure::Transport => AdminError::Transport("mock transport failure".to_string()),
        }
    }
}

/// A call received by [`MockMessApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessCall {
    /// `GET /mess/all`
    FetchAll,

    /// `PATCH /mess/update/{id}`
    Update {
        /// Target mess id.
        id: String,
        /// Request body.
        request: UpdateRequest,
    },
}

/// Mock mess adapter for testing.
///
/// # Examples
///
/// ```
/// use messadmin_core::api::mess::MessApi;
/// use messadmin_core::api::mess_mock::MockMessApi;
/// use messadmin_core::model::{MealType, MessRecord};
///
/// let api = MockMessApi::with_records(vec![
///     MessRecord::new("1", "Quick Bites", "Central Courtyard", MealType::Veg),
/// ]);
/// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let batch = rt.block_on(api.fetch_all()).unwrap();
/// assert_eq!(batch.records.len(), 1);
/// assert_eq!(api.fetch_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockMessApi {
    /// Collection served by `fetch_all`.
    records: Arc<Mutex<Vec<MessRecord>>>,
    /// Programmed failure for `fetch_all`.
    fetch_failure: Arc<Mutex<Option<MockFailure>>>,
    /// Programmed failures for `update_status`, per id.
    update_failures: Arc<Mutex<HashMap<String, MockFailure>>>,
    /// Programmed failure for every `update_status` without a per-id entry.
    default_update_failure: Arc<Mutex<Option<MockFailure>>>,
    /// History of received calls.
    history: Arc<Mutex<Vec<MessCall>>>,
}

impl MockMessApi {
    /// Creates a mock serving an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock serving `records`.
    pub fn with_records(records: Vec<MessRecord>) -> Self {
        let api = Self::new();
        api.set_records(records);
        api
    }

    /// Replaces the served collection.
    pub fn set_records(&self, records: Vec<MessRecord>) {
        *self.records.lock().unwrap() = records;
    }

    /// Returns the collection as the mock backend currently holds it.
    pub fn records(&self) -> Vec<MessRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Makes `fetch_all` fail until cleared.
    pub fn fail_fetch(&self, failure: MockFailure) {
        *self.fetch_failure.lock().unwrap() = Some(failure);
    }

    /// Makes `update_status` fail for one id.
    pub fn fail_update_for(&self, id: &str, failure: MockFailure) {
        self.update_failures
            .lock()
            .unwrap()
            .insert(id.to_string(), failure);
    }

    /// Makes every `update_status` fail.
    pub fn fail_all_updates(&self, failure: MockFailure) {
        *self.default_update_failure.lock().unwrap() = Some(failure);
    }

    /// Removes all programmed failures.
    pub fn clear_failures(&self) {
        *self.fetch_failure.lock().unwrap() = None;
        self.update_failures.lock().unwrap().clear();
        *self.default_update_failure.lock().unwrap() = None;
    }

    /// Returns the history of received calls.
    pub fn history(&self) -> Vec<MessCall> {
        self.history.lock().unwrap().clone()
    }

    /// Returns how many list retrievals were received.
    pub fn fetch_count(&self) -> usize {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, MessCall::FetchAll))
            .count()
    }

    /// Returns how many updates were received for `id`.
    pub fn update_count(&self, id: &str) -> usize {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, MessCall::Update { id: call_id, .. } if call_id == id))
            .count()
    }

    /// Returns the total number of updates received.
    pub fn total_update_count(&self) -> usize {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, MessCall::Update { .. }))
            .count()
    }
}

#[async_trait]
impl MessApi for MockMessApi {
    async fn fetch_all(&self) -> Result<MessBatch> {
        self.history.lock().unwrap().push(MessCall::FetchAll);

        if let Some(failure) = *self.fetch_failure.lock().unwrap() {
            return Err(failure.to_error());
        }

        Ok(MessBatch::from_records(self.records()))
    }

    async fn update_status(&self, id: &str, request: &UpdateRequest) -> Result<()> {
        self.history.lock().unwrap().push(MessCall::Update {
            id: id.to_string(),
            request: request.clone(),
        });

        let failure = self
            .update_failures
            .lock()
            .unwrap()
            .get(id)
            .copied()
            .or(*self.default_update_failure.lock().unwrap());
        if let Some(failure) = failure {
            return Err(failure.to_error());
        }

        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                *record = record.with_status(request.status, request.rejection_reason.clone());
                Ok(())
            }
            None => Err(AdminError::HttpStatus {
                status: 404,
                message: Some("Mess not found".to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MealType, VerificationStatus};

    fn accept() -> UpdateRequest {
        UpdateRequest {
            status: VerificationStatus::Verified,
            rejection_reason: None,
        }
    }

    #[tokio::test]
    async fn test_mock_update_changes_backend_copy() {
        let api = MockMessApi::with_records(vec![MessRecord::new("1", "A", "x", MealType::Veg)]);

        api.update_status("1", &accept()).await.unwrap();

        assert_eq!(api.records()[0].verification_status, VerificationStatus::Verified);
        assert_eq!(api.update_count("1"), 1);
    }

    #[tokio::test]
    async fn test_mock_programmed_failures() {
        let api = MockMessApi::with_records(vec![MessRecord::new("1", "A", "x", MealType::Veg)]);
        api.fail_fetch(MockFailure::Status(503));
        api.fail_update_for("1", MockFailure::Transport);

        assert!(matches!(
            api.fetch_all().await,
            Err(AdminError::HttpStatus { status: 503, .. })
        ));
        assert!(matches!(
            api.update_status("1", &accept()).await,
            Err(AdminError::Transport(_))
        ));
        assert!(api.records()[0].is_pending());

        api.clear_failures();
        assert!(api.fetch_all().await.is_ok());
        assert_eq!(api.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_unknown_id_is_404() {
        let api = MockMessApi::new();
        assert!(matches!(
            api.update_status("missing", &accept()).await,
            Err(AdminError::HttpStatus { status: 404, .. })
        ));
    }
}
