/// Sync batch construction from the library index
use crate::error::{LibraryError, Result};
use crate::index::{LibraryIndex, SeriesKey};
use shelf_core::SyncRequest;
use std::path::PathBuf;

/// Which part of the library a sync batch covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    /// One book, written back with its own series and index
    Book(PathBuf),

    /// Every book of one (author, series) bucket
    ///
    /// With `rename`, every book is moved to that series name, keeping its
    /// index. Renaming to the standalone name removes the series atoms.
    Series {
        /// Author of the bucket
        author: String,
        /// Series of the bucket
        series: SeriesKey,
        /// New series name for every book in the bucket
        rename: Option<String>,
    },

    /// Every book of one author, each written back to its own bucket
    Author(String),
}

impl SyncScope {
    /// Expand the scope into one request per book
    ///
    /// Fails when the scope names a book, author or bucket the index does
    /// not hold.
    pub fn requests(&self, index: &LibraryIndex) -> Result<Vec<SyncRequest>> {
        let requests: Vec<SyncRequest> = match self {
            SyncScope::Book(path) => {
                let record = index
                    .find(path)
                    .ok_or_else(|| LibraryError::NotInLibrary(path.display().to_string()))?;
                vec![SyncRequest::for_record(record.clone())]
            }
            SyncScope::Series {
                author,
                series,
                rename,
            } => {
                let target = rename.as_deref().unwrap_or(series.as_str());
                index
                    .books(author, series)
                    .iter()
                    .map(|record| {
                        let target_index = record
                            .series_index
                            .as_ref()
                            .map(|i| i.as_str().to_string());
                        SyncRequest::new(record.clone(), target, target_index)
                    })
                    .collect()
            }
            SyncScope::Author(author) => index
                .books_by(author)
                .cloned()
                .map(SyncRequest::for_record)
                .collect(),
        };

        if requests.is_empty() {
            return Err(LibraryError::NotInLibrary(self.to_string()));
        }
        Ok(requests)
    }
}

impl std::fmt::Display for SyncScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncScope::Book(path) => write!(f, "book {}", path.display()),
            SyncScope::Series { author, series, .. } => {
                write!(f, "series {series:?} of {author:?}")
            }
            SyncScope::Author(author) => write!(f, "author {author:?}"),
        }
    }
}
