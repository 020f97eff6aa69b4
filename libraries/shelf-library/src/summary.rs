/// Sync batch summary
use serde::Serialize;
use shelf_core::{SyncOutcome, SyncStatus};

/// Every outcome of a batch plus per-status counts
///
/// `outcomes.len()` always equals the batch size.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncSummary {
    /// Outcomes in request order
    pub outcomes: Vec<SyncOutcome>,

    /// Files written
    pub succeeded: usize,

    /// Files that could not be written
    pub failed: usize,

    /// Requests skipped after cancellation
    pub cancelled: usize,
}

impl SyncSummary {
    /// Count outcomes by status
    pub fn from_outcomes(outcomes: Vec<SyncOutcome>) -> Self {
        let mut summary = Self::default();
        for outcome in &outcomes {
            match outcome.status {
                SyncStatus::Updated { .. } => summary.succeeded += 1,
                SyncStatus::Failed { .. } => summary.failed += 1,
                SyncStatus::Cancelled => summary.cancelled += 1,
            }
        }
        summary.outcomes = outcomes;
        summary
    }

    /// Number of requests in the batch
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if every request was written
    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total()
    }
}
