//! Metadata resolution
//!
//! Merges one file's sidecar and embedded atoms into a [`CanonicalRecord`].
//! Each field is decided on its own: a non-empty sidecar value wins, then the
//! embedded atom, then the model default. Both the happy path and the
//! degraded path (container unreadable) are plain branches over `Option`s.

use crate::atoms::AtomBackend;
use crate::embedded::EmbeddedTags;
use crate::series::parse_series;
use crate::sidecar::Sidecar;
use shelf_core::{
    AuthorPolicy, CanonicalRecord, ExtendedFields, MetadataOrigin, Provenance, SeriesIndex,
};
use std::path::Path;
use tracing::{debug, warn};

/// Tracks which sources actually supplied a field
#[derive(Debug, Default)]
struct SourceUsage {
    sidecar: bool,
    embedded: bool,
}

impl SourceUsage {
    fn pick(&mut self, sidecar: Option<String>, embedded: Option<&String>) -> Option<String> {
        if let Some(value) = sidecar.filter(|v| !v.trim().is_empty()) {
            self.sidecar = true;
            return Some(value.trim().to_string());
        }
        if let Some(value) = embedded.filter(|v| !v.trim().is_empty()) {
            self.embedded = true;
            return Some(value.trim().to_string());
        }
        None
    }

    fn origin(&self, embedded_readable: bool) -> MetadataOrigin {
        match (self.sidecar, self.embedded) {
            (true, true) => MetadataOrigin::Mixed,
            (true, false) => MetadataOrigin::Json,
            (false, true) => MetadataOrigin::Tag,
            (false, false) if embedded_readable => MetadataOrigin::Tag,
            (false, false) => MetadataOrigin::Defaults,
        }
    }
}

/// Resolve one file from already-read sources
///
/// `embedded` is `None` when the container could not be read. The result is
/// a pure function of the inputs.
pub fn resolve_record(
    path: &Path,
    sidecar: Option<&Sidecar>,
    embedded: Option<&EmbeddedTags>,
    policy: AuthorPolicy,
) -> CanonicalRecord {
    let empty = EmbeddedTags::default();
    let tags = embedded.unwrap_or(&empty);
    let mut usage = SourceUsage::default();

    let title = usage.pick(sidecar.and_then(Sidecar::title), tags.title.as_ref());
    let author = usage.pick(
        sidecar.and_then(|s| policy.collapse(&s.authors())),
        tags.artist.as_ref().or(tags.album_artist.as_ref()),
    );
    let series_raw = usage.pick(sidecar.and_then(Sidecar::series), tags.grouping.as_ref());

    let extended = ExtendedFields {
        narrators: usage.pick(sidecar.and_then(Sidecar::narrators), tags.narrators.as_ref()),
        year: usage.pick(sidecar.and_then(Sidecar::year), tags.year.as_ref()),
        isbn: usage.pick(sidecar.and_then(Sidecar::isbn), tags.isbn.as_ref()),
        asin: usage.pick(sidecar.and_then(Sidecar::asin), tags.asin.as_ref()),
        description: usage.pick(sidecar.and_then(Sidecar::description), tags.comment.as_ref()),
    };

    let mut record = CanonicalRecord::new(
        path.to_path_buf(),
        title.unwrap_or_default(),
        author.unwrap_or_default(),
    );
    record.extended = extended;

    let mut used_fallback = false;
    if let Some(raw) = series_raw {
        let hint = record.stem();
        let parsed = parse_series(&raw, &hint);

        let index = if parsed.has_explicit_index() {
            parsed.index.clone()
        } else if let Some(disk) = tags.disk_number.filter(|_| tags.disk_total != Some(1)) {
            usage.embedded = true;
            Some(SeriesIndex::from_disk_number(disk))
        } else {
            used_fallback = parsed.used_fallback;
            parsed.index.clone()
        };

        record.series_name = Some(parsed.name);
        record.series_index = index;
    }

    record.provenance =
        Provenance::new(usage.origin(embedded.is_some())).with_file_number_fallback(used_fallback);
    record.apply_defaults();
    record
}

/// Resolves records by reading the embedded side through an [`AtomBackend`]
#[derive(Debug, Clone)]
pub struct MetadataResolver<B> {
    backend: B,
    policy: AuthorPolicy,
}

impl<B: AtomBackend> MetadataResolver<B> {
    /// Create a resolver
    pub fn new(backend: B, policy: AuthorPolicy) -> Self {
        Self { backend, policy }
    }

    /// Author policy in effect
    pub fn policy(&self) -> AuthorPolicy {
        self.policy
    }

    /// Resolve one file
    ///
    /// Never fails: an unreadable container degrades to sidecar-only data
    /// (or model defaults), visible in the record's provenance.
    pub fn resolve(&self, path: &Path, sidecar: Option<&Sidecar>) -> CanonicalRecord {
        let embedded = match EmbeddedTags::read(&self.backend, path) {
            Ok(tags) => Some(tags),
            Err(e) => {
                warn!("Reading atoms failed for {:?}, continuing without them: {}", path, e);
                None
            }
        };

        let record = resolve_record(path, sidecar, embedded.as_ref(), self.policy);
        debug!(
            "Resolved {:?}: {:?} by {:?} [{}]",
            path, record.title, record.author, record.provenance
        );
        record
    }
}
