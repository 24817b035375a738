//! View state for the admin mess screen.
//!
//! `MessViewState` is owned by one view instance for its lifetime and is
//! never shared between instances. All mutation goes through `&mut self`,
//! so a single event loop can apply network results without locking. The
//! workflow phases that mutate it live in [`crate::workflows`].

use crate::model::{MessRecord, VerificationStatus};
use crate::partition::{Partitions, StatusCounts, partition};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// In-memory state behind the mess verification screen.
#[derive(Debug, Clone, Default)]
pub struct MessViewState {
    /// Flat collection, unique by id, in server order.
    pub(crate) messes: Vec<MessRecord>,

    /// One-shot mount latch: set right before the first mount fetch is
    /// dispatched and never reset for the lifetime of the view.
    pub(crate) fetch_latch: bool,

    /// Fetches dispatched and not yet finished.
    pub(crate) fetches_in_flight: u32,

    /// Ids with a dispatched, unfinished status update.
    pub(crate) updates_in_flight: HashSet<String>,

    /// Completion time of the last successful fetch.
    pub(crate) last_loaded_at: Option<DateTime<Utc>>,
}

impl MessViewState {
    /// Creates an empty, not yet mounted view state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a view state already holding `messes`.
    ///
    /// The mount latch stays unset, so a mount still triggers a fetch.
    pub fn with_messes(messes: Vec<MessRecord>) -> Self {
        Self {
            messes,
            ..Self::default()
        }
    }

    /// Returns the whole collection.
    pub fn messes(&self) -> &[MessRecord] {
        &self.messes
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &str) -> Option<&MessRecord> {
        self.messes.iter().find(|m| m.id == id)
    }

    /// Returns the records with `status`, in collection order.
    pub fn partition(&self, status: VerificationStatus) -> Vec<&MessRecord> {
        partition(&self.messes, status)
    }

    /// Returns all three status views.
    pub fn partitions(&self) -> Partitions<'_> {
        Partitions::from_records(&self.messes)
    }

    /// Returns the number of records per status.
    pub fn counts(&self) -> StatusCounts {
        self.partitions().counts()
    }

    /// Returns `true` while any fetch or update is outstanding.
    pub fn is_loading(&self) -> bool {
        self.fetches_in_flight > 0 || !self.updates_in_flight.is_empty()
    }

    /// Returns `true` while a fetch is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.fetches_in_flight > 0
    }

    /// Returns `true` while an update for `id` is outstanding.
    ///
    /// Front ends disable the accept/reject actions for such a record.
    pub fn is_updating(&self, id: &str) -> bool {
        self.updates_in_flight.contains(id)
    }

    /// Returns `true` once the mount fetch has been dispatched.
    pub fn has_mounted(&self) -> bool {
        self.fetch_latch
    }

    /// Returns when the collection was last replaced by a fetch.
    pub fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.last_loaded_at
    }

    /// Replaces the record whose id matches `next.id`, in place.
    ///
    /// Returns `false` and changes nothing when no record matches.
    pub(crate) fn replace_record(&mut self, next: MessRecord) -> bool {
        match self.messes.iter_mut().find(|m| m.id == next.id) {
            Some(slot) => {
                *slot = next;
                true
            }
            None => false,
        }
    }
}
