//! Tag write-back
//!
//! Writes a record's title/author, a target series, and the extended fields
//! into the file's atoms. Batches never abort: every request yields exactly
//! one [`SyncOutcome`], in input order.

use crate::atoms::{AtomBackend, AtomContainer, FreeformAtom, TextAtom};
use crate::embedded::EmbeddedTags;
use crate::error::Result;
use crate::resolver::resolve_record;
use shelf_core::{AuthorPolicy, CanonicalRecord, GroupingStyle, SeriesIndex, SyncOutcome, SyncRequest};
use tracing::{debug, error, info};

/// Applies [`SyncRequest`]s through an [`AtomBackend`]
#[derive(Debug, Clone)]
pub struct TagSynchronizer<B> {
    backend: B,
    grouping_style: GroupingStyle,
}

impl<B: AtomBackend> TagSynchronizer<B> {
    /// Create a synchronizer
    pub fn new(backend: B, grouping_style: GroupingStyle) -> Self {
        Self {
            backend,
            grouping_style,
        }
    }

    /// Apply a whole batch in input order
    pub fn apply(&self, batch: &[SyncRequest]) -> Vec<SyncOutcome> {
        let outcomes: Vec<SyncOutcome> = batch.iter().map(|request| self.outcome(request)).collect();
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            "Tag sync finished: {} succeeded, {} failed",
            succeeded,
            outcomes.len() - succeeded
        );
        outcomes
    }

    /// Apply one request, converting any error into a failed outcome
    pub fn outcome(&self, request: &SyncRequest) -> SyncOutcome {
        let path = request.path().clone();
        match self.sync_one(request) {
            Ok(record) => SyncOutcome::updated(path, record),
            Err(e) => {
                error!("Failed to update tags of {:?}: {}", path, e);
                SyncOutcome::failed(path, e.to_string())
            }
        }
    }

    /// Apply one request
    ///
    /// On success returns the record as the saved atoms now describe it
    /// (resolved without a sidecar), so callers can replace their copy.
    pub fn sync_one(&self, request: &SyncRequest) -> Result<CanonicalRecord> {
        let path = request.path();
        let mut container = self.backend.open(path)?;

        write_request(&mut container, request, self.grouping_style);
        container.save()?;
        debug!("Updated tags of {:?} -> {:?}", path, request.target_series);

        let tags = EmbeddedTags::from_container(&container);
        Ok(resolve_record(path, None, Some(&tags), AuthorPolicy::FirstOnly))
    }
}

/// Stage every atom change for one request on an open container
fn write_request<C: AtomContainer>(container: &mut C, request: &SyncRequest, style: GroupingStyle) {
    let record = &request.record;

    container.set_text(TextAtom::Title, &record.title);
    container.set_text(TextAtom::Artist, &record.author);
    container.set_text(TextAtom::AlbumArtist, &record.author);

    let index = request.target_index.as_deref().and_then(|text| {
        SeriesIndex::parse(text)
            .map_err(|e| debug!("Leaving disk number unset for {:?}: {}", record.path, e))
            .ok()
    });

    if request.is_standalone() {
        // Real absence, not blank strings, so other tools see no series
        container.remove_text(TextAtom::Grouping);
        container.remove_text(TextAtom::Album);
    } else {
        let series = request.target_series.trim();
        let grouping = style.render(series, index.as_ref().map(SeriesIndex::as_str));
        container.set_text(TextAtom::Grouping, &grouping);
        container.set_text(TextAtom::Album, series);
    }

    match index.as_ref().map(|index| (index, index.disk_number())) {
        Some((_, Some(disk))) => container.set_disk_number(disk),
        Some((index, None)) => {
            debug!("Index {} of {:?} does not fit the disk atom, leaving it unset", index, record.path);
        }
        None => {}
    }

    let extended = &record.extended;
    if let Some(narrators) = &extended.narrators {
        container.set_freeform(FreeformAtom::Narrators, narrators);
    }
    if let Some(year) = &extended.year {
        container.set_text(TextAtom::Year, year);
    }
    if let Some(isbn) = &extended.isbn {
        container.set_freeform(FreeformAtom::Isbn, isbn);
    }
    if let Some(asin) = &extended.asin {
        container.set_freeform(FreeformAtom::Asin, asin);
    }
    if let Some(description) = &extended.description {
        container.set_text(TextAtom::Comment, description);
    }
}
