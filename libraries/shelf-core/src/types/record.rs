/// Canonical audiobook record
use crate::types::{Provenance, SeriesIndex, STANDALONE_SERIES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Title used when neither source nor filename yields one
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Author used when no source yields one
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Optional extended metadata
///
/// Every field is independently optional; absence is a typed `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedFields {
    /// Narrators, joined with `", "` when the source lists several
    pub narrators: Option<String>,

    /// Publication year
    pub year: Option<String>,

    /// ISBN
    pub isbn: Option<String>,

    /// Audible ASIN
    pub asin: Option<String>,

    /// Free-text description
    pub description: Option<String>,
}

impl ExtendedFields {
    /// Check if no extended field is present
    pub fn is_empty(&self) -> bool {
        self.narrators.is_none()
            && self.year.is_none()
            && self.isbn.is_none()
            && self.asin.is_none()
            && self.description.is_none()
    }
}

/// Resolved metadata for one audio file
///
/// `path` is the identity used everywhere (index lookups, sync outcomes).
/// It is compared exactly as discovered; no normalisation is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Filesystem location (identity)
    pub path: PathBuf,

    /// File name including extension
    pub filename: String,

    /// Book title, never empty
    pub title: String,

    /// Single author, never empty
    pub author: String,

    /// Series name, `None` for standalone books
    pub series_name: Option<String>,

    /// Position inside the series
    pub series_index: Option<SeriesIndex>,

    /// Where the metadata came from
    pub provenance: Provenance,

    /// Optional extended fields
    #[serde(default)]
    pub extended: ExtendedFields,
}

impl CanonicalRecord {
    /// Create a record with no series and no extended fields
    ///
    /// Empty `title`/`author` are replaced with the model defaults.
    pub fn new(path: PathBuf, title: impl Into<String>, author: impl Into<String>) -> Self {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut record = Self {
            path,
            filename,
            title: title.into(),
            author: author.into(),
            series_name: None,
            series_index: None,
            provenance: Provenance::default(),
            extended: ExtendedFields::default(),
        };
        record.apply_defaults();
        record
    }

    /// File stem, used as the default title
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
    }

    /// Enforce the non-empty title/author invariant
    pub fn apply_defaults(&mut self) {
        if self.title.trim().is_empty() {
            self.title = self.stem();
        }
        if self.author.trim().is_empty() {
            self.author = UNKNOWN_AUTHOR.to_string();
        }
        if self
            .series_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty() || name == STANDALONE_SERIES)
        {
            self.series_name = None;
        }
    }

    /// Series bucket this record belongs to
    pub fn series_key(&self) -> &str {
        self.series_name.as_deref().unwrap_or(STANDALONE_SERIES)
    }

    /// Check if the record belongs to a named series
    pub fn has_series(&self) -> bool {
        self.series_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_fall_back_to_defaults() {
        let record = CanonicalRecord::new(PathBuf::from("/lib/Dune.m4b"), "  ", "");
        assert_eq!(record.title, "Dune");
        assert_eq!(record.author, UNKNOWN_AUTHOR);
        assert_eq!(record.filename, "Dune.m4b");
    }

    #[test]
    fn standalone_sentinel_is_not_a_series_name() {
        let mut record = CanonicalRecord::new(PathBuf::from("a.m4b"), "A", "B");
        record.series_name = Some(STANDALONE_SERIES.to_string());
        record.apply_defaults();
        assert!(!record.has_series());
        assert_eq!(record.series_key(), STANDALONE_SERIES);
    }
}
