//! List fetch workflow.

use crate::api::mess::MessApi;
use crate::error::Result;
use crate::model::MessBatch;
use crate::state::MessViewState;
use chrono::Utc;
use std::collections::HashSet;

/// What caused a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    /// First activation of the view; honours the one-shot latch.
    Mount,

    /// Explicit user refresh; bypasses the latch.
    Refresh,
}

/// Proof that a fetch was dispatched. Must be handed back to
/// [`MessViewState::finish_fetch`] exactly once.
#[derive(Debug)]
#[must_use = "a dispatched fetch must be finished to release the loading indicator"]
pub struct FetchTicket {
    trigger: FetchTrigger,
}

impl FetchTicket {
    /// Returns what caused the fetch.
    pub fn trigger(&self) -> FetchTrigger {
        self.trigger
    }
}

/// Summary of a successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchReport {
    /// Records now held by the view.
    pub loaded: usize,

    /// Records dropped by boundary validation or as duplicates.
    pub skipped: usize,
}

impl MessViewState {
    /// Starts a fetch, or returns `None` when the mount latch suppresses it.
    ///
    /// For [`FetchTrigger::Mount`] the latch is set before the ticket is
    /// handed out, so a second mount event never dispatches another request.
    pub fn begin_fetch(&mut self, trigger: FetchTrigger) -> Option<FetchTicket> {
        if trigger == FetchTrigger::Mount {
            if self.fetch_latch {
                tracing::debug!("mount fetch suppressed by one-shot latch");
                return None;
            }
            self.fetch_latch = true;
        }

        self.fetches_in_flight += 1;
        Some(FetchTicket { trigger })
    }

    /// Completes a fetch started with [`MessViewState::begin_fetch`].
    ///
    /// The loading indicator is released on every path. On success the
    /// whole collection is replaced; on failure it is left untouched and
    /// the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the error carried by `result`.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<MessBatch>) -> Result<FetchReport> {
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);

        let batch = match result {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(trigger = ?ticket.trigger, error = %e, "mess fetch failed, keeping current list");
                return Err(e);
            }
        };

        let mut seen = HashSet::new();
        let mut skipped = batch.skipped;
        let mut messes = Vec::with_capacity(batch.records.len());
        for record in batch.records {
            if seen.insert(record.id.clone()) {
                messes.push(record);
            } else {
                skipped += 1;
            }
        }

        let report = FetchReport {
            loaded: messes.len(),
            skipped,
        };
        self.messes = messes;
        self.last_loaded_at = Some(Utc::now());

        tracing::info!(
            trigger = ?ticket.trigger,
            loaded = report.loaded,
            skipped = report.skipped,
            "mess list loaded"
        );
        Ok(report)
    }
}

/// Fetches the mess collection into `state`.
///
/// Returns `Ok(None)` without touching the network when a mount fetch is
/// suppressed by the one-shot latch.
///
/// # Errors
///
/// Returns the adapter's error; the collection is left untouched.
#[tracing::instrument(skip_all, fields(trigger = ?trigger))]
pub async fn fetch_messes(
    state: &mut MessViewState,
    api: &dyn MessApi,
    trigger: FetchTrigger,
) -> Result<Option<FetchReport>> {
    let Some(ticket) = state.begin_fetch(trigger) else {
        return Ok(None);
    };

    let result = api.fetch_all().await;
    state.finish_fetch(ticket, result).map(Some)
}
