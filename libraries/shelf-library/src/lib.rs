//! Shelf Library
//!
//! Turns a folder of audiobooks into a browsable index and drives batch
//! tag write-back over it.
//!
//! This crate provides:
//! - Recursive discovery of `.m4b`/`.m4a` files with per-directory sidecars
//! - The author → series → books index with deterministic ordering
//! - Expansion of book/series/author selections into sync batches
//! - A background engine emitting typed progress events, with cancellation
//!
//! # Example
//!
//! ```rust,no_run
//! use shelf_library::{EngineConfig, LibraryEngine, SyncScope};
//! use shelf_metadata::Mp4Backend;
//! use std::path::Path;
//! use tokio_util::sync::CancellationToken;
//!
//! # fn main() -> shelf_library::Result<()> {
//! let engine = LibraryEngine::new(Mp4Backend, EngineConfig::default());
//! let cancel = CancellationToken::new();
//!
//! let index = engine.scan(Path::new("/audiobooks"), &cancel, |event| println!("{event:?}"))?;
//! for author in index.authors() {
//!     println!("{author}");
//! }
//!
//! let batch = SyncScope::Author("Jane Doe".to_string()).requests(&index)?;
//! let summary = engine.sync(&batch, &cancel, |_| {});
//! assert_eq!(summary.total(), batch.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod engine;
mod error;
mod events;
mod index;
mod scanner;
mod scope;
mod summary;

pub use config::EngineConfig;
pub use engine::LibraryEngine;
pub use error::{LibraryError, Result};
pub use events::{progress_percent, EngineEvent};
pub use index::{LibraryIndex, SeriesKey};
pub use scanner::{FileScanner, SidecarCache};
pub use scope::SyncScope;
pub use summary::SyncSummary;
