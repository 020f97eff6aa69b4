//! Shelf Metadata
//!
//! Reads and writes audiobook metadata for Shelf.
//!
//! This crate provides:
//! - Typed access to MP4 atoms (standard text, disk number, iTunes free-form)
//! - Sidecar `metadata.json` loading with lenient field shapes
//! - Series string parsing (`"Saga #3"` → `("Saga", "3")`) with a filename fallback
//! - Field-by-field resolution of sidecar and embedded metadata into one record
//! - Batch tag write-back with per-file failure isolation
//!
//! # Example
//!
//! ```rust,no_run
//! use shelf_core::{AuthorPolicy, GroupingStyle, SyncRequest};
//! use shelf_metadata::{load_sidecar, MetadataResolver, Mp4Backend, TagSynchronizer};
//! use std::path::Path;
//!
//! let path = Path::new("/audiobooks/Saga/Saga 03.m4b");
//! let sidecar = load_sidecar(Path::new("/audiobooks/Saga"), &["metadata.json".to_string()]);
//!
//! let resolver = MetadataResolver::new(Mp4Backend, AuthorPolicy::FirstOnly);
//! let record = resolver.resolve(path, sidecar.as_ref());
//!
//! let synchronizer = TagSynchronizer::new(Mp4Backend, GroupingStyle::NameOnly);
//! let outcomes = synchronizer.apply(&[SyncRequest::for_record(record)]);
//! assert_eq!(outcomes.len(), 1);
//! ```

mod atoms;
mod embedded;
mod error;
mod memory;
mod mp4;
mod resolver;
mod series;
mod sidecar;
mod writer;

pub use atoms::{AtomBackend, AtomContainer, FreeformAtom, TextAtom};
pub use embedded::EmbeddedTags;
pub use error::{MetadataError, Result};
pub use memory::{MemoryAtoms, MemoryBackend, MemoryFile};
pub use mp4::{Mp4Atoms, Mp4Backend};
pub use resolver::{resolve_record, MetadataResolver};
pub use series::{parse_series, SeriesParse};
pub use sidecar::{load_sidecar, Sidecar, SidecarValue};
pub use writer::TagSynchronizer;
