//! Background orchestration of scans and sync batches
//!
//! Each unit of work is sequential over its files so progress stays
//! monotonic and no two writers touch the tree at once. The synchronous
//! `scan`/`sync` take an event callback; `spawn_scan`/`spawn_sync` run the
//! same code on the blocking pool and forward events through a channel.

use crate::config::EngineConfig;
use crate::error::{LibraryError, Result};
use crate::events::{progress_percent, EngineEvent};
use crate::index::LibraryIndex;
use crate::scanner::{FileScanner, SidecarCache};
use crate::summary::SyncSummary;
use shelf_core::{SyncOutcome, SyncRequest};
use shelf_metadata::{AtomBackend, MetadataResolver, TagSynchronizer};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Capacity of the event channel handed to callers
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Scan and sync orchestrator
#[derive(Debug, Clone)]
pub struct LibraryEngine<B> {
    backend: B,
    config: EngineConfig,
}

impl<B> LibraryEngine<B>
where
    B: AtomBackend + Clone + 'static,
{
    /// Create an engine over an atom backend
    pub fn new(backend: B, config: EngineConfig) -> Self {
        Self { backend, config }
    }

    /// Configuration in effect
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Discover, resolve and index every audiobook under `root`
    ///
    /// A missing or non-directory root fails before any file is touched.
    /// Unreadable files and sidecars only degrade their own record.
    pub fn scan<F>(
        &self,
        root: &Path,
        cancel: &CancellationToken,
        mut emit: F,
    ) -> Result<LibraryIndex>
    where
        F: FnMut(EngineEvent),
    {
        emit(EngineEvent::ScanStatus {
            message: format!("Scanning {}", root.display()),
        });

        let files = FileScanner::new(self.config.clone()).scan_directory(root)?;
        emit(EngineEvent::ScanStatus {
            message: format!("Found {} audiobook files", files.len()),
        });

        if files.is_empty() {
            emit(EngineEvent::ScanProgress { percent: 100 });
        }

        let resolver = MetadataResolver::new(self.backend.clone(), self.config.author_policy);
        let mut sidecars = SidecarCache::new(self.config.sidecar_names.clone());
        let mut records = Vec::with_capacity(files.len());

        for (done, path) in files.iter().enumerate() {
            if cancel.is_cancelled() {
                info!("Scan of {:?} cancelled after {} files", root, done);
                return Err(LibraryError::Cancelled);
            }

            records.push(resolver.resolve(path, sidecars.for_file(path)));
            emit(EngineEvent::ScanProgress {
                percent: progress_percent(done + 1, files.len()),
            });
        }

        let index = LibraryIndex::build(records);
        info!(
            "Indexed {} books by {} authors under {:?}",
            index.len(),
            index.author_count(),
            root
        );
        emit(EngineEvent::ScanStatus {
            message: format!(
                "Indexed {} books by {} authors",
                index.len(),
                index.author_count()
            ),
        });
        emit(EngineEvent::ScanComplete {
            index: index.clone(),
        });

        Ok(index)
    }

    /// Apply a sync batch in order
    ///
    /// Every request yields exactly one outcome. After cancellation the
    /// remaining requests are reported as cancelled without touching their
    /// files.
    pub fn sync<F>(
        &self,
        batch: &[SyncRequest],
        cancel: &CancellationToken,
        mut emit: F,
    ) -> SyncSummary
    where
        F: FnMut(EngineEvent),
    {
        let synchronizer = TagSynchronizer::new(self.backend.clone(), self.config.grouping_style);
        let total = batch.len();
        let mut outcomes = Vec::with_capacity(total);

        if total == 0 {
            emit(EngineEvent::SyncProgress { percent: 100 });
        }

        for (done, request) in batch.iter().enumerate() {
            if cancel.is_cancelled() {
                info!("Sync cancelled, {} of {} requests skipped", total - done, total);
                outcomes.extend(
                    batch[done..]
                        .iter()
                        .map(|skipped| SyncOutcome::cancelled(skipped.path().clone())),
                );
                emit(EngineEvent::SyncProgress { percent: 100 });
                break;
            }

            let outcome = synchronizer.outcome(request);
            emit(EngineEvent::SyncItemComplete {
                path: outcome.path.clone(),
                success: outcome.is_success(),
            });
            outcomes.push(outcome);
            emit(EngineEvent::SyncProgress {
                percent: progress_percent(done + 1, total),
            });
        }

        let summary = SyncSummary::from_outcomes(outcomes);
        info!(
            "Sync finished: {} succeeded, {} failed, {} cancelled",
            summary.succeeded, summary.failed, summary.cancelled
        );
        emit(EngineEvent::SyncComplete);
        summary
    }

    /// Run [`scan`](Self::scan) in the background
    ///
    /// Returns a channel for receiving events and a handle to the scan task
    pub fn spawn_scan(
        &self,
        root: PathBuf,
        cancel: CancellationToken,
    ) -> (mpsc::Receiver<EngineEvent>, JoinHandle<Result<LibraryIndex>>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let engine = self.clone();

        let handle = tokio::task::spawn_blocking(move || {
            engine.scan(&root, &cancel, |event| {
                let _ = tx.blocking_send(event);
            })
        });

        (rx, handle)
    }

    /// Run [`sync`](Self::sync) in the background
    ///
    /// Returns a channel for receiving events and a handle to the sync task
    pub fn spawn_sync(
        &self,
        batch: Vec<SyncRequest>,
        cancel: CancellationToken,
    ) -> (mpsc::Receiver<EngineEvent>, JoinHandle<SyncSummary>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let engine = self.clone();

        let handle = tokio::task::spawn_blocking(move || {
            engine.sync(&batch, &cancel, |event| {
                let _ = tx.blocking_send(event);
            })
        });

        (rx, handle)
    }
}
