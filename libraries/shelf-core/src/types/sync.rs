/// Tag synchronization requests and outcomes
use crate::types::{CanonicalRecord, STANDALONE_SERIES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One record plus the series target to write into its file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRequest {
    /// Record supplying title, author and extended fields
    pub record: CanonicalRecord,

    /// Target series name; [`STANDALONE_SERIES`] removes the series atoms
    pub target_series: String,

    /// Target index text; non-numeric text leaves the disk number untouched
    pub target_index: Option<String>,
}

impl SyncRequest {
    /// Create a request with an explicit target
    pub fn new(
        record: CanonicalRecord,
        target_series: impl Into<String>,
        target_index: Option<String>,
    ) -> Self {
        Self {
            record,
            target_series: target_series.into(),
            target_index,
        }
    }

    /// Create a request that writes back the record's own series and index
    pub fn for_record(record: CanonicalRecord) -> Self {
        let target_series = record.series_key().to_string();
        let target_index = record.series_index.as_ref().map(|i| i.as_str().to_string());
        Self::new(record, target_series, target_index)
    }

    /// Check if the target removes the series
    pub fn is_standalone(&self) -> bool {
        let target = self.target_series.trim();
        target.is_empty() || target == STANDALONE_SERIES
    }

    /// Path of the file to write
    pub fn path(&self) -> &PathBuf {
        &self.record.path
    }
}

/// Result of synchronizing one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncStatus {
    /// Atoms written and saved; carries the record as now stored on disk
    Updated {
        /// Record rebuilt from the saved atoms
        record: Box<CanonicalRecord>,
    },

    /// The container could not be opened or saved
    Failed {
        /// Human-readable reason
        reason: String,
    },

    /// The batch was cancelled before this item was touched
    Cancelled,
}

/// Per-item outcome of a sync batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncOutcome {
    /// Path from the request, unchanged
    pub path: PathBuf,

    /// What happened
    #[serde(flatten)]
    pub status: SyncStatus,
}

impl SyncOutcome {
    /// Successful outcome
    pub fn updated(path: PathBuf, record: CanonicalRecord) -> Self {
        Self {
            path,
            status: SyncStatus::Updated {
                record: Box::new(record),
            },
        }
    }

    /// Failed outcome
    pub fn failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            path,
            status: SyncStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    /// Cancelled outcome
    pub fn cancelled(path: PathBuf) -> Self {
        Self {
            path,
            status: SyncStatus::Cancelled,
        }
    }

    /// Check if the file was written
    pub fn is_success(&self) -> bool {
        matches!(self.status, SyncStatus::Updated { .. })
    }

    /// Updated record, if the write succeeded
    pub fn record(&self) -> Option<&CanonicalRecord> {
        match &self.status {
            SyncStatus::Updated { record } => Some(record.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeriesIndex;

    #[test]
    fn for_record_targets_own_bucket() {
        let mut record = CanonicalRecord::new(PathBuf::from("/b/x.m4b"), "X", "Y");
        let standalone = SyncRequest::for_record(record.clone());
        assert!(standalone.is_standalone());
        assert_eq!(standalone.target_index, None);

        record.series_name = Some("Saga".to_string());
        record.series_index = Some(SeriesIndex::parse("2.5").unwrap());
        let request = SyncRequest::for_record(record);
        assert!(!request.is_standalone());
        assert_eq!(request.target_series, "Saga");
        assert_eq!(request.target_index.as_deref(), Some("2.5"));
    }

    #[test]
    fn outcome_reports_success() {
        let record = CanonicalRecord::new(PathBuf::from("/b/x.m4b"), "X", "Y");
        let ok = SyncOutcome::updated(record.path.clone(), record.clone());
        assert!(ok.is_success());
        assert_eq!(ok.record(), Some(&record));

        let failed = SyncOutcome::failed(record.path.clone(), "read-only");
        assert!(!failed.is_success());
        assert!(failed.record().is_none());
        assert!(!SyncOutcome::cancelled(record.path).is_success());
    }
}
