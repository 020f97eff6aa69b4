//! Shelf Core
//!
//! Domain types shared by every Shelf crate: the resolved audiobook record,
//! its provenance, the validated series index, and the requests and outcomes
//! exchanged with the tag synchronizer.
//!
//! # Example
//!
//! ```rust
//! use shelf_core::{CanonicalRecord, SeriesIndex, STANDALONE_SERIES};
//! use std::path::PathBuf;
//!
//! let mut record = CanonicalRecord::new(PathBuf::from("/books/Saga 03.m4b"), "Saga 3", "Jane Doe");
//! assert_eq!(record.series_key(), STANDALONE_SERIES);
//!
//! record.series_name = Some("Saga".to_string());
//! record.series_index = Some(SeriesIndex::parse("3").unwrap());
//! assert_eq!(record.series_key(), "Saga");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

pub use error::{Result, ShelfError};
pub use types::{
    AuthorPolicy, CanonicalRecord, ExtendedFields, GroupingStyle, MetadataOrigin, Provenance,
    SeriesIndex, SyncOutcome, SyncRequest, SyncStatus, STANDALONE_SERIES, UNKNOWN_AUTHOR,
    UNKNOWN_TITLE,
};
