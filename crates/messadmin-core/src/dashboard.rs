//! Dashboard overview data.
//!
//! The headline statistics and activity feed are sample figures; the
//! backend exposes no endpoint for them yet. The verification summary is
//! computed from the loaded mess collection.

use crate::model::VerificationStatus;
use crate::partition::StatusCounts;
use serde::Serialize;

/// Direction of a statistic's change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
        }
    }
}

/// A headline statistic card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub trend: Trend,
}

/// An entry in the recent activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub user: &'static str,
    pub action: &'static str,
    pub time: &'static str,
}

/// Number of messes per verification status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VerificationSummary {
    pub verified: usize,
    pub pending: usize,
    pub rejected: usize,
    pub total: usize,
}

impl From<StatusCounts> for VerificationSummary {
    fn from(counts: StatusCounts) -> Self {
        Self {
            verified: counts.verified,
            pending: counts.pending,
            rejected: counts.rejected,
            total: counts.total(),
        }
    }
}

impl VerificationSummary {
    /// Returns `(label, count)` pairs in display order.
    pub fn rows(&self) -> [(&'static str, usize); 3] {
        VerificationStatus::ALL.map(|status| {
            let count = match status {
                VerificationStatus::Verified => self.verified,
                VerificationStatus::Pending => self.pending,
                VerificationStatus::Rejected => self.rejected,
            };
            (status.label(), count)
        })
    }
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardOverview {
    pub stats: Vec<StatCard>,
    pub recent_activity: Vec<ActivityEntry>,
    pub verification: VerificationSummary,
}

impl DashboardOverview {
    /// Sample overview with an empty verification summary.
    pub fn sample() -> Self {
        Self {
            stats: vec![
                StatCard {
                    title: "Total Users",
                    value: "1,234",
                    change: "+12%",
                    trend: Trend::Up,
                },
                StatCard {
                    title: "Active Orders",
                    value: "56",
                    change: "+5.2%",
                    trend: Trend::Up,
                },
                StatCard {
                    title: "Revenue",
                    value: "$12,345",
                    change: "-2.1%",
                    trend: Trend::Down,
                },
                StatCard {
                    title: "Satisfaction",
                    value: "92%",
                    change: "+3%",
                    trend: Trend::Up,
                },
            ],
            recent_activity: vec![
                ActivityEntry {
                    user: "John Doe",
                    action: "placed an order",
                    time: "2 min ago",
                },
                ActivityEntry {
                    user: "Jane Smith",
                    action: "updated profile",
                    time: "10 min ago",
                },
                ActivityEntry {
                    user: "Robert Johnson",
                    action: "completed payment",
                    time: "25 min ago",
                },
                ActivityEntry {
                    user: "Emily Davis",
                    action: "requested support",
                    time: "1 hour ago",
                },
            ],
            verification: VerificationSummary::default(),
        }
    }

    /// Attaches the verification summary computed from `counts`.
    #[must_use]
    pub fn with_counts(mut self, counts: StatusCounts) -> Self {
        self.verification = counts.into();
        self
    }
}
