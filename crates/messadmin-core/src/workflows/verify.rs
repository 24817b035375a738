//! Verification action workflow.
//!
//! Turns an accept/reject decision on a pending mess into a status update
//! against the backend and, once the server confirms, into an in-place
//! replacement of that one record. Nothing changes locally before the
//! server answers, and a failed update is never retried automatically.

use crate::api::mess::{MessApi, UpdateRequest};
use crate::config::DEFAULT_REJECTION_REASON;
use crate::error::{AdminError, Result};
use crate::model::VerificationStatus;
use crate::state::MessViewState;
use std::fmt;
use std::str::FromStr;

/// Admin decision on a pending mess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    /// Status the mess moves to when the decision succeeds.
    pub fn target_status(self) -> VerificationStatus {
        match self {
            Decision::Accept => VerificationStatus::Verified,
            Decision::Reject => VerificationStatus::Rejected,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Accept => "accept",
            Decision::Reject => "reject",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accept" | "approve" | "verify" => Ok(Decision::Accept),
            "reject" => Ok(Decision::Reject),
            other => Err(format!("unknown decision: {other}")),
        }
    }
}

/// A dispatched status update awaiting the server's answer.
///
/// Returned by [`MessViewState::begin_update`]; must be handed back to
/// [`MessViewState::finish_update`] exactly once.
#[derive(Debug)]
#[must_use = "a dispatched update must be finished to release the mess"]
pub struct PendingUpdate {
    id: String,
    mess_name: String,
    decision: Decision,
    request: UpdateRequest,
}

impl PendingUpdate {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mess_name(&self) -> &str {
        &self.mess_name
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Body to send with `PATCH {base}/mess/update/{id}`.
    pub fn request(&self) -> &UpdateRequest {
        &self.request
    }
}

/// Confirmed result of a verification decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub id: String,
    pub mess_name: String,
    pub status: VerificationStatus,
    pub rejection_reason: Option<String>,
}

impl MessViewState {
    /// Validates a decision and marks the mess as having an update in flight.
    ///
    /// A blank `rejection_reason` on a reject falls back to
    /// [`DEFAULT_REJECTION_REASON`]; the reason is ignored on accept.
    ///
    /// # Errors
    ///
    /// - `AdminError::MessNotFound` when no record has `id`
    /// - `AdminError::ActionInFlight` when an update for `id` is outstanding
    /// - `AdminError::InvalidTransition` when the mess is not pending
    pub fn begin_update(
        &mut self,
        id: &str,
        decision: Decision,
        rejection_reason: &str,
    ) -> Result<PendingUpdate> {
        let record = self
            .get(id)
            .ok_or_else(|| AdminError::MessNotFound(id.to_string()))?;

        if self.updates_in_flight.contains(id) {
            return Err(AdminError::ActionInFlight(id.to_string()));
        }

        let status = decision.target_status();
        if !record.is_pending() {
            return Err(AdminError::InvalidTransition {
                id: id.to_string(),
                from: record.verification_status.to_string(),
                to: status.to_string(),
            });
        }

        let reason = match decision {
            Decision::Accept => None,
            Decision::Reject => {
                let reason = rejection_reason.trim();
                Some(if reason.is_empty() {
                    DEFAULT_REJECTION_REASON.to_string()
                } else {
                    reason.to_string()
                })
            }
        };

        let pending = PendingUpdate {
            id: record.id.clone(),
            mess_name: record.name.clone(),
            decision,
            request: UpdateRequest {
                status,
                rejection_reason: reason,
            },
        };
        self.updates_in_flight.insert(pending.id.clone());

        tracing::debug!(mess_id = %pending.id, decision = %decision, "status update dispatched");
        Ok(pending)
    }

    /// Applies the server's answer to a dispatched update.
    ///
    /// The in-flight mark is cleared on every path. On success the matching
    /// record is replaced in place by a copy carrying the new status and
    /// reason; on failure the collection is untouched.
    ///
    /// # Errors
    ///
    /// Returns the error carried by `result`.
    pub fn finish_update(
        &mut self,
        pending: PendingUpdate,
        result: Result<()>,
    ) -> Result<VerificationOutcome> {
        self.updates_in_flight.remove(&pending.id);

        if let Err(e) = result {
            tracing::warn!(mess_id = %pending.id, decision = %pending.decision, error = %e, "status update failed");
            return Err(e);
        }

        let UpdateRequest {
            status,
            rejection_reason,
        } = pending.request;

        let next = self
            .get(&pending.id)
            .map(|current| current.with_status(status, rejection_reason.clone()));
        match next {
            Some(next) => {
                self.replace_record(next);
            }
            None => {
                // A refresh replaced the collection while the update was out.
                tracing::warn!(mess_id = %pending.id, "updated mess no longer in the local list");
            }
        }

        tracing::info!(mess_id = %pending.id, status = %status, "mess status updated");
        Ok(VerificationOutcome {
            id: pending.id,
            mess_name: pending.mess_name,
            status,
            rejection_reason,
        })
    }
}

/// Applies `decision` to the mess `id` and waits for the server.
///
/// # Errors
///
/// Returns the errors of [`MessViewState::begin_update`] without touching
/// the network, or the adapter's error when the update fails.
#[tracing::instrument(skip_all, fields(mess_id = %id, decision = %decision))]
pub async fn apply_decision(
    state: &mut MessViewState,
    api: &dyn MessApi,
    id: &str,
    decision: Decision,
    rejection_reason: &str,
) -> Result<VerificationOutcome> {
    let pending = state.begin_update(id, decision, rejection_reason)?;
    let result = api.update_status(pending.id(), pending.request()).await;
    state.finish_update(pending, result)
}
