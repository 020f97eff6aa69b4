/// Snapshot of the embedded atoms the engine understands
use crate::atoms::{AtomBackend, AtomContainer, FreeformAtom, TextAtom};
use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// Embedded metadata read from one container
///
/// Values are kept exactly as stored; blank atoms are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmbeddedTags {
    /// `©nam`
    pub title: Option<String>,
    /// `©ART`
    pub artist: Option<String>,
    /// `aART`
    pub album_artist: Option<String>,
    /// `©grp`
    pub grouping: Option<String>,
    /// `©alb`
    pub album: Option<String>,
    /// `©cmt`
    pub comment: Option<String>,
    /// `©day`
    pub year: Option<String>,
    /// `----:com.apple.iTunes:Narrators`
    pub narrators: Option<String>,
    /// `----:com.apple.iTunes:ISBN`
    pub isbn: Option<String>,
    /// `----:com.apple.iTunes:ASIN`
    pub asin: Option<String>,
    /// `disk`
    pub disk_number: Option<u32>,
    /// Total half of `disk`
    pub disk_total: Option<u32>,
}

impl EmbeddedTags {
    /// Read every known atom from an opened container
    pub fn from_container<C: AtomContainer + ?Sized>(container: &C) -> Self {
        let text = |atom| present(container.text(atom));
        let freeform = |atom| present(container.freeform(atom));

        Self {
            title: text(TextAtom::Title),
            artist: text(TextAtom::Artist),
            album_artist: text(TextAtom::AlbumArtist),
            grouping: text(TextAtom::Grouping),
            album: text(TextAtom::Album),
            comment: text(TextAtom::Comment),
            year: text(TextAtom::Year),
            narrators: freeform(FreeformAtom::Narrators),
            isbn: freeform(FreeformAtom::Isbn),
            asin: freeform(FreeformAtom::Asin),
            disk_number: container.disk_number(),
            disk_total: container.disk_total(),
        }
    }

    /// Open `path` with `backend` and read its atoms
    pub fn read<B: AtomBackend + ?Sized>(backend: &B, path: &Path) -> Result<Self> {
        let container = backend.open(path)?;
        Ok(Self::from_container(&container))
    }

    /// Labelled `(name, value)` pairs of every present atom, for inspection views
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        let mut push = |label: String, value: &Option<String>| {
            if let Some(value) = value {
                entries.push((label, value.clone()));
            }
        };

        push(TextAtom::Title.label().to_string(), &self.title);
        push(TextAtom::Artist.label().to_string(), &self.artist);
        push(TextAtom::AlbumArtist.label().to_string(), &self.album_artist);
        push(TextAtom::Grouping.label().to_string(), &self.grouping);
        push(TextAtom::Album.label().to_string(), &self.album);
        push(TextAtom::Year.label().to_string(), &self.year);
        push(TextAtom::Comment.label().to_string(), &self.comment);
        push(FreeformAtom::Narrators.key(), &self.narrators);
        push(FreeformAtom::Isbn.key(), &self.isbn);
        push(FreeformAtom::Asin.key(), &self.asin);
        let disk = self.disk_number.map(|d| match self.disk_total {
            Some(total) => format!("{d}/{total}"),
            None => d.to_string(),
        });
        push("disk".to_string(), &disk);

        entries
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
