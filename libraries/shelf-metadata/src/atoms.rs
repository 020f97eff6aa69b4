//! Typed atom access
//!
//! The engine only touches the handful of MP4 `ilst` atoms that carry
//! audiobook text metadata. Standard atoms are addressed by their fourcc;
//! vendor atoms use the free-form `----` encoding with a reverse-DNS mean.

use crate::error::Result;
use std::path::Path;

/// Mean (namespace) used for every free-form atom the engine writes
pub const ITUNES_MEAN: &str = "com.apple.iTunes";

/// Standard text atoms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextAtom {
    /// `©nam`
    Title,
    /// `©ART`, primary artist
    Artist,
    /// `aART`
    AlbumArtist,
    /// `©grp`, raw series string
    Grouping,
    /// `©alb`, mirrors the series target
    Album,
    /// `©cmt`, description
    Comment,
    /// `©day`, release date or year
    Year,
}

impl TextAtom {
    /// Every standard text atom
    pub const ALL: [TextAtom; 7] = [
        TextAtom::Title,
        TextAtom::Artist,
        TextAtom::AlbumArtist,
        TextAtom::Grouping,
        TextAtom::Album,
        TextAtom::Comment,
        TextAtom::Year,
    ];

    /// Container-native four-character code
    pub fn fourcc(self) -> [u8; 4] {
        match self {
            TextAtom::Title => *b"\xa9nam",
            TextAtom::Artist => *b"\xa9ART",
            TextAtom::AlbumArtist => *b"aART",
            TextAtom::Grouping => *b"\xa9grp",
            TextAtom::Album => *b"\xa9alb",
            TextAtom::Comment => *b"\xa9cmt",
            TextAtom::Year => *b"\xa9day",
        }
    }

    /// Display name for inspection output
    pub fn label(self) -> &'static str {
        match self {
            TextAtom::Title => "title",
            TextAtom::Artist => "artist",
            TextAtom::AlbumArtist => "album artist",
            TextAtom::Grouping => "grouping",
            TextAtom::Album => "album",
            TextAtom::Comment => "comment",
            TextAtom::Year => "year",
        }
    }
}

/// Vendor free-form atoms (`----:com.apple.iTunes:<name>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FreeformAtom {
    /// Narrators
    Narrators,
    /// ISBN
    Isbn,
    /// Audible ASIN
    Asin,
}

impl FreeformAtom {
    /// Every free-form atom the engine knows
    pub const ALL: [FreeformAtom; 3] = [
        FreeformAtom::Narrators,
        FreeformAtom::Isbn,
        FreeformAtom::Asin,
    ];

    /// Reverse-DNS namespace
    pub fn mean(self) -> &'static str {
        ITUNES_MEAN
    }

    /// Atom name inside the namespace
    pub fn name(self) -> &'static str {
        match self {
            FreeformAtom::Narrators => "Narrators",
            FreeformAtom::Isbn => "ISBN",
            FreeformAtom::Asin => "ASIN",
        }
    }

    /// Full key as tools display it, e.g. `----:com.apple.iTunes:ISBN`
    pub fn key(self) -> String {
        format!("----:{}:{}", self.mean(), self.name())
    }
}

/// An opened atom container
///
/// Mutations stay in memory until [`AtomContainer::save`] succeeds.
pub trait AtomContainer {
    /// Read a standard text atom
    fn text(&self, atom: TextAtom) -> Option<String>;

    /// Replace a standard text atom
    fn set_text(&mut self, atom: TextAtom, value: &str);

    /// Delete a standard text atom (no-op when absent)
    fn remove_text(&mut self, atom: TextAtom);

    /// Read a free-form atom as text
    fn freeform(&self, atom: FreeformAtom) -> Option<String>;

    /// Replace a free-form atom with raw UTF-8 text
    fn set_freeform(&mut self, atom: FreeformAtom, value: &str);

    /// Read the disk-number atom
    fn disk_number(&self) -> Option<u32>;

    /// Read the disk-total half of the disk-number atom
    fn disk_total(&self) -> Option<u32>;

    /// Replace the disk-number atom, clearing any stored total
    fn set_disk_number(&mut self, disk: u16);

    /// Persist every mutation to the underlying file
    fn save(&mut self) -> Result<()>;
}

/// Opens atom containers by path
///
/// The resolver and synchronizer depend on this capability, never on a
/// concrete tag library.
pub trait AtomBackend: Send + Sync {
    /// Container type produced by this backend
    type Container: AtomContainer;

    /// Open the container stored at `path`
    fn open(&self, path: &Path) -> Result<Self::Container>;
}
