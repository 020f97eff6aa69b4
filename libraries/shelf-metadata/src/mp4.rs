/// MP4 atom backend implementation using lofty
use crate::atoms::{AtomBackend, AtomContainer, FreeformAtom, TextAtom};
use crate::error::{MetadataError, Result};
use lofty::mp4::{Atom, AtomData, AtomIdent, Ilst, Mp4File};
use lofty::{Accessor, AudioFile, ParseOptions, TagExt};
use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Atom backend reading and writing `.m4b`/`.m4a` files through lofty
#[derive(Debug, Clone, Copy, Default)]
pub struct Mp4Backend;

impl Mp4Backend {
    /// Create a new MP4 backend
    pub fn new() -> Self {
        Self
    }
}

impl AtomBackend for Mp4Backend {
    type Container = Mp4Atoms;

    fn open(&self, path: &Path) -> Result<Mp4Atoms> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.display().to_string()));
        }

        let mut file = File::open(path)?;
        let mp4 = Mp4File::read_from(&mut file, ParseOptions::new())
            .map_err(|e| MetadataError::UnsupportedContainer(format!("{}: {e}", path.display())))?;

        // A file without an ilst is still writable; start from an empty one
        let ilst = mp4.ilst().cloned().unwrap_or_default();
        debug!("Opened {:?} ({} atoms)", path, ilst.len());

        Ok(Mp4Atoms {
            path: path.to_path_buf(),
            ilst,
        })
    }
}

/// The `ilst` atom list of one MP4 file
#[derive(Debug, Clone)]
pub struct Mp4Atoms {
    path: PathBuf,
    ilst: Ilst,
}

impl Mp4Atoms {
    fn replace(&mut self, ident: AtomIdent<'static>, data: AtomData) {
        remove_all(&mut self.ilst, &ident);
        self.ilst.insert(Atom::new(ident, data));
    }
}

fn fourcc(atom: TextAtom) -> AtomIdent<'static> {
    AtomIdent::Fourcc(atom.fourcc())
}

fn freeform(atom: FreeformAtom) -> AtomIdent<'static> {
    AtomIdent::Freeform {
        mean: Cow::Borrowed(atom.mean()),
        name: Cow::Borrowed(atom.name()),
    }
}

fn remove_all(ilst: &mut Ilst, ident: &AtomIdent<'_>) {
    // Drained atoms are dropped here
    let removed = ilst.remove(ident).into_iter().count();
    if removed > 0 {
        debug!("Removed {} atom(s) {:?}", removed, ident);
    }
}

/// First textual payload of an atom
///
/// Free-form atoms written by other tools sometimes carry an "implicit"
/// type code, which lofty surfaces as raw bytes.
fn first_text(atom: &Atom<'_>) -> Option<String> {
    atom.data().find_map(|data| match data {
        AtomData::UTF8(text) | AtomData::UTF16(text) => Some(text.clone()),
        AtomData::Unknown { data, .. } => Some(String::from_utf8_lossy(data).into_owned()),
        _ => None,
    })
}

impl AtomContainer for Mp4Atoms {
    fn text(&self, atom: TextAtom) -> Option<String> {
        self.ilst.get(&fourcc(atom)).and_then(first_text)
    }

    fn set_text(&mut self, atom: TextAtom, value: &str) {
        self.replace(fourcc(atom), AtomData::UTF8(value.to_string()));
    }

    fn remove_text(&mut self, atom: TextAtom) {
        remove_all(&mut self.ilst, &fourcc(atom));
    }

    fn freeform(&self, atom: FreeformAtom) -> Option<String> {
        self.ilst.get(&freeform(atom)).and_then(first_text)
    }

    fn set_freeform(&mut self, atom: FreeformAtom, value: &str) {
        self.replace(freeform(atom), AtomData::UTF8(value.to_string()));
    }

    fn disk_number(&self) -> Option<u32> {
        self.ilst.disk()
    }

    fn disk_total(&self) -> Option<u32> {
        // A zero total means "not stored"
        self.ilst.disk_total().filter(|&total| total > 0)
    }

    fn set_disk_number(&mut self, disk: u16) {
        self.ilst.set_disk(u32::from(disk));
        self.ilst.remove_disk_total();
    }

    fn save(&mut self) -> Result<()> {
        self.ilst
            .save_to_path(&self.path)
            .map_err(|e| MetadataError::WriteError(format!("{}: {e}", self.path.display())))?;
        debug!("Saved atoms to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn atoms() -> Mp4Atoms {
        Mp4Atoms {
            path: PathBuf::from("/lib/book.m4b"),
            ilst: Ilst::default(),
        }
    }

    #[test]
    fn set_text_replaces_instead_of_appending() {
        let mut atoms = atoms();
        atoms.set_text(TextAtom::Grouping, "Old Saga");
        atoms.set_text(TextAtom::Grouping, "New Saga");

        assert_eq!(atoms.text(TextAtom::Grouping).as_deref(), Some("New Saga"));
        let stored = atoms.ilst.get(&fourcc(TextAtom::Grouping)).unwrap();
        assert_eq!(stored.data().count(), 1);
        assert_eq!(atoms.ilst.len(), 1);
    }

    #[test]
    fn remove_text_leaves_no_atom_behind() {
        let mut atoms = atoms();
        atoms.set_text(TextAtom::Grouping, "Saga");
        atoms.set_text(TextAtom::Album, "Saga");
        atoms.set_text(TextAtom::Title, "Dawn");

        atoms.remove_text(TextAtom::Grouping);
        atoms.remove_text(TextAtom::Album);
        atoms.remove_text(TextAtom::Album);

        assert!(atoms.ilst.get(&fourcc(TextAtom::Grouping)).is_none());
        assert!(atoms.ilst.get(&fourcc(TextAtom::Album)).is_none());
        assert_eq!(atoms.text(TextAtom::Grouping), None);
        assert_eq!(atoms.text(TextAtom::Title).as_deref(), Some("Dawn"));
    }

    #[test]
    fn freeform_atoms_live_under_itunes_mean() {
        let mut atoms = atoms();
        atoms.set_freeform(FreeformAtom::Isbn, "978-0441013593");
        atoms.set_freeform(FreeformAtom::Narrators, "Sam Reader");

        let ident = AtomIdent::Freeform {
            mean: Cow::Borrowed("com.apple.iTunes"),
            name: Cow::Borrowed("ISBN"),
        };
        assert!(atoms.ilst.get(&ident).is_some());
        assert_eq!(atoms.freeform(FreeformAtom::Isbn).as_deref(), Some("978-0441013593"));
        assert_eq!(atoms.freeform(FreeformAtom::Narrators).as_deref(), Some("Sam Reader"));
        assert_eq!(atoms.freeform(FreeformAtom::Asin), None);
    }

    #[test]
    fn freeform_with_implicit_type_reads_as_text() {
        let mut atoms = atoms();
        atoms.ilst.insert(Atom::new(
            freeform(FreeformAtom::Asin),
            AtomData::Unknown {
                code: 0,
                data: b"B00ABC".to_vec(),
            },
        ));
        assert_eq!(atoms.freeform(FreeformAtom::Asin).as_deref(), Some("B00ABC"));
    }

    #[test]
    fn disk_number_holds_sixteen_bit_values() {
        let mut atoms = atoms();
        atoms.set_disk_number(u16::MAX);
        assert_eq!(atoms.disk_number(), Some(u32::from(u16::MAX)));

        let oversized = shelf_core::SeriesIndex::parse("70000").unwrap();
        assert_eq!(oversized.disk_number(), None);
        assert_eq!(atoms.disk_number(), Some(65535));
    }

    #[test]
    fn writing_disk_number_clears_stored_total() {
        let mut atoms = atoms();
        atoms.ilst.set_disk(1);
        atoms.ilst.set_disk_total(1);
        assert_eq!(atoms.disk_total(), Some(1));

        atoms.set_disk_number(3);
        assert_eq!(atoms.disk_number(), Some(3));
        assert_eq!(atoms.disk_total(), None);
    }

    #[test]
    fn open_nonexistent_file_returns_not_found() {
        let result = Mp4Backend::new().open(Path::new("/nonexistent/book.m4b"));
        assert!(matches!(result, Err(MetadataError::FileNotFound(_))));
    }

    #[test]
    fn open_non_mp4_bytes_is_unsupported() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("broken.m4b");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"definitely not an mp4 container").unwrap();

        let result = Mp4Backend::new().open(&path);
        assert!(matches!(result, Err(MetadataError::UnsupportedContainer(_))));
    }
}
