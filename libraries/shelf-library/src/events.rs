/// Events emitted by the background engine
use crate::index::LibraryIndex;
use std::path::PathBuf;

/// One-way message from the engine to its collaborator
///
/// This is the whole observable surface of a running scan or sync.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Scan progress, 0-100, monotonic
    ScanProgress {
        /// Percent of discovered files resolved
        percent: u8,
    },

    /// Human-readable scan status
    ScanStatus {
        /// Status text
        message: String,
    },

    /// Scan finished with this index
    ScanComplete {
        /// Built index
        index: LibraryIndex,
    },

    /// Sync progress, 0-100, monotonic
    SyncProgress {
        /// Percent of requests processed
        percent: u8,
    },

    /// One sync request finished
    SyncItemComplete {
        /// Path of the request
        path: PathBuf,
        /// The file was written
        success: bool,
    },

    /// Sync batch finished
    SyncComplete,
}

/// Percent of `total` done after `completed` items; an empty batch is complete
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (completed.min(total) * 100 / total) as u8
}
