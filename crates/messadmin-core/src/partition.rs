//! Status partitioning of the mess collection.
//!
//! Partitions are borrowed views recomputed from the flat collection
//! whenever a consumer needs them. They hold no state of their own.

use crate::model::{MessRecord, VerificationStatus};

/// Returns the records with `status`, in collection order.
pub fn partition(records: &[MessRecord], status: VerificationStatus) -> Vec<&MessRecord> {
    records
        .iter()
        .filter(|r| r.verification_status == status)
        .collect()
}

/// The three disjoint status views of one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partitions<'a> {
    pub verified: Vec<&'a MessRecord>,
    pub pending: Vec<&'a MessRecord>,
    pub rejected: Vec<&'a MessRecord>,
}

impl<'a> Partitions<'a> {
    /// Splits `records` by status in a single pass, preserving order.
    pub fn from_records(records: &'a [MessRecord]) -> Self {
        let mut partitions = Partitions::default();
        for record in records {
            match record.verification_status {
                VerificationStatus::Verified => partitions.verified.push(record),
                VerificationStatus::Pending => partitions.pending.push(record),
                VerificationStatus::Rejected => partitions.rejected.push(record),
            }
        }
        partitions
    }

    /// Returns the view for one status.
    pub fn get(&self, status: VerificationStatus) -> &[&'a MessRecord] {
        match status {
            VerificationStatus::Verified => &self.verified,
            VerificationStatus::Pending => &self.pending,
            VerificationStatus::Rejected => &self.rejected,
        }
    }

    /// Returns the size of each view.
    pub fn counts(&self) -> StatusCounts {
        StatusCounts {
            verified: self.verified.len(),
            pending: self.pending.len(),
            rejected: self.rejected.len(),
        }
    }
}

/// Number of records per verification status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub verified: usize,
    pub pending: usize,
    pub rejected: usize,
}

impl StatusCounts {
    /// Returns the count for one status.
    pub fn get(&self, status: VerificationStatus) -> usize {
        match status {
            VerificationStatus::Verified => self.verified,
            VerificationStatus::Pending => self.pending,
            VerificationStatus::Rejected => self.rejected,
        }
    }

    /// Returns the size of the whole collection.
    pub fn total(&self) -> usize {
        self.verified + self.pending + self.rejected
    }
}
