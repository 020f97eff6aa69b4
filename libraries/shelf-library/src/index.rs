//! Library index: author → series → ordered books
//!
//! The index is a pure function of the records it holds. Discovery order
//! never leaks into it: authors and series sit in ordered maps and every
//! bucket is sorted by (series index, title, path).

use serde::{Deserialize, Serialize};
use shelf_core::{CanonicalRecord, SeriesIndex, SyncOutcome, STANDALONE_SERIES};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

/// Series bucket key
///
/// Variant order puts [`SeriesKey::Standalone`] after every named series.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SeriesKey {
    /// A named series
    Named(String),

    /// Books without a resolvable series
    Standalone,
}

impl SeriesKey {
    /// Bucket of a record
    pub fn of(record: &CanonicalRecord) -> Self {
        record
            .series_name
            .as_deref()
            .map_or(SeriesKey::Standalone, SeriesKey::from_name)
    }

    /// Bucket for a series name; blank and the sentinel name map to standalone
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || name == STANDALONE_SERIES {
            SeriesKey::Standalone
        } else {
            SeriesKey::Named(name.to_string())
        }
    }

    /// Display name of the bucket
    pub fn as_str(&self) -> &str {
        match self {
            SeriesKey::Named(name) => name,
            SeriesKey::Standalone => STANDALONE_SERIES,
        }
    }

    /// Check if this is the standalone bucket
    pub fn is_standalone(&self) -> bool {
        matches!(self, SeriesKey::Standalone)
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SeriesKey {
    fn from(name: String) -> Self {
        SeriesKey::from_name(&name)
    }
}

impl From<SeriesKey> for String {
    fn from(key: SeriesKey) -> Self {
        match key {
            SeriesKey::Named(name) => name,
            SeriesKey::Standalone => STANDALONE_SERIES.to_string(),
        }
    }
}

type Buckets = BTreeMap<SeriesKey, Vec<CanonicalRecord>>;

/// Hierarchical view of a scanned library
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LibraryIndex {
    authors: BTreeMap<String, Buckets>,

    #[serde(skip)]
    placement: HashMap<PathBuf, (String, SeriesKey)>,
}

impl LibraryIndex {
    /// Build an index from resolved records
    ///
    /// Paths are identities: a later record with the same path replaces an
    /// earlier one.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CanonicalRecord>,
    {
        let mut index = Self::default();
        for record in records {
            index.place(record);
        }
        for buckets in index.authors.values_mut() {
            for books in buckets.values_mut() {
                books.sort_by(compare_books);
            }
        }
        index
    }

    /// Insert or replace one record, keeping its bucket ordered
    pub fn insert(&mut self, record: CanonicalRecord) {
        let (author, key) = self.place(record);
        if let Some(books) = self
            .authors
            .get_mut(&author)
            .and_then(|buckets| buckets.get_mut(&key))
        {
            books.sort_by(compare_books);
        }
    }

    /// Remove the record stored under `path`
    pub fn remove(&mut self, path: &Path) -> Option<CanonicalRecord> {
        let (author, key) = self.placement.remove(path)?;
        let buckets = self.authors.get_mut(&author)?;
        let books = buckets.get_mut(&key)?;
        let position = books.iter().position(|book| book.path == path)?;
        let record = books.remove(position);

        if books.is_empty() {
            buckets.remove(&key);
        }
        if buckets.is_empty() {
            self.authors.remove(&author);
        }
        Some(record)
    }

    /// Replace every successfully synced record with its updated version
    ///
    /// Records move bucket when their author or series changed. Returns the
    /// number of records replaced.
    pub fn apply_outcomes(&mut self, outcomes: &[SyncOutcome]) -> usize {
        let mut replaced = 0;
        for record in outcomes.iter().filter_map(SyncOutcome::record) {
            self.insert(record.clone());
            replaced += 1;
        }
        replaced
    }

    /// Record stored under `path`
    pub fn find(&self, path: &Path) -> Option<&CanonicalRecord> {
        let (author, key) = self.placement.get(path)?;
        self.books(author, key).iter().find(|book| book.path == path)
    }

    /// Author names, ascending
    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.authors.keys().map(String::as_str)
    }

    /// Series of one author, named series first, standalone last
    pub fn series_of(&self, author: &str) -> impl Iterator<Item = &SeriesKey> {
        self.authors
            .get(author)
            .into_iter()
            .flat_map(|buckets| buckets.keys())
    }

    /// Ordered books of one bucket; empty when the bucket does not exist
    pub fn books(&self, author: &str, series: &SeriesKey) -> &[CanonicalRecord] {
        self.authors
            .get(author)
            .and_then(|buckets| buckets.get(series))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every record of one author, in presentation order
    pub fn books_by(&self, author: &str) -> impl Iterator<Item = &CanonicalRecord> {
        self.authors
            .get(author)
            .into_iter()
            .flat_map(|buckets| buckets.values().flatten())
    }

    /// Every record, in presentation order
    pub fn records(&self) -> impl Iterator<Item = &CanonicalRecord> {
        self.authors
            .values()
            .flat_map(|buckets| buckets.values().flatten())
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.placement.len()
    }

    /// Check if the index holds no records
    pub fn is_empty(&self) -> bool {
        self.placement.is_empty()
    }

    /// Number of authors
    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    /// Put a record into its bucket without sorting, replacing any record with the same path
    fn place(&mut self, record: CanonicalRecord) -> (String, SeriesKey) {
        self.remove(&record.path);

        let author = record.author.clone();
        let key = SeriesKey::of(&record);
        self.placement
            .insert(record.path.clone(), (author.clone(), key.clone()));
        self.authors
            .entry(author.clone())
            .or_default()
            .entry(key.clone())
            .or_default()
            .push(record);
        (author, key)
    }
}

/// Bucket order: indexed volumes ascending, then unindexed; ties by title, then path
fn compare_books(a: &CanonicalRecord, b: &CanonicalRecord) -> Ordering {
    SeriesIndex::cmp_optional(a.series_index.as_ref(), b.series_index.as_ref())
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.path.cmp(&b.path))
}
