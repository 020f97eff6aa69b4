//! In-memory atom backend
//!
//! Holds atom state per path behind a shared map, for exercising resolution
//! and write-back without MP4 fixtures.

use crate::atoms::{AtomBackend, AtomContainer, FreeformAtom, TextAtom};
use crate::error::{MetadataError, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Stored atom state of one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFile {
    /// Standard text atoms
    pub text: BTreeMap<TextAtom, String>,

    /// Free-form atoms
    pub freeform: BTreeMap<FreeformAtom, String>,

    /// Disk-number atom
    pub disk: Option<u32>,

    /// Disk total stored alongside the disk number
    pub disk_total: Option<u32>,

    /// Reject saves, like a read-only file
    pub read_only: bool,

    /// Reject opens, like a damaged container
    pub unreadable: bool,
}

impl MemoryFile {
    /// Empty, writable file
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a text atom
    pub fn with_text(mut self, atom: TextAtom, value: impl Into<String>) -> Self {
        self.text.insert(atom, value.into());
        self
    }

    /// Builder: set a free-form atom
    pub fn with_freeform(mut self, atom: FreeformAtom, value: impl Into<String>) -> Self {
        self.freeform.insert(atom, value.into());
        self
    }

    /// Builder: set the disk number
    pub fn with_disk(mut self, disk: u32) -> Self {
        self.disk = Some(disk);
        self
    }

    /// Builder: set the disk number together with a total, like `1/1`
    pub fn with_disk_of(mut self, disk: u32, total: u32) -> Self {
        self.disk = Some(disk);
        self.disk_total = Some(total);
        self
    }
}

type Store = Arc<Mutex<HashMap<PathBuf, MemoryFile>>>;

/// Atom backend backed by a shared in-memory map
///
/// Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    files: Store,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the state of a file
    pub fn insert(&self, path: impl Into<PathBuf>, file: MemoryFile) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), file);
    }

    /// Current state of a file
    pub fn get(&self, path: &Path) -> Option<MemoryFile> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Number of files held
    pub fn len(&self) -> usize {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the backend holds no files
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AtomBackend for MemoryBackend {
    type Container = MemoryAtoms;

    fn open(&self, path: &Path) -> Result<MemoryAtoms> {
        let file = self
            .get(path)
            .ok_or_else(|| MetadataError::FileNotFound(path.display().to_string()))?;

        if file.unreadable {
            return Err(MetadataError::UnsupportedContainer(
                path.display().to_string(),
            ));
        }

        Ok(MemoryAtoms {
            path: path.to_path_buf(),
            file,
            store: Arc::clone(&self.files),
        })
    }
}

/// Working copy of one in-memory file
#[derive(Debug, Clone)]
pub struct MemoryAtoms {
    path: PathBuf,
    file: MemoryFile,
    store: Store,
}

impl AtomContainer for MemoryAtoms {
    fn text(&self, atom: TextAtom) -> Option<String> {
        self.file.text.get(&atom).cloned()
    }

    fn set_text(&mut self, atom: TextAtom, value: &str) {
        self.file.text.insert(atom, value.to_string());
    }

    fn remove_text(&mut self, atom: TextAtom) {
        self.file.text.remove(&atom);
    }

    fn freeform(&self, atom: FreeformAtom) -> Option<String> {
        self.file.freeform.get(&atom).cloned()
    }

    fn set_freeform(&mut self, atom: FreeformAtom, value: &str) {
        self.file.freeform.insert(atom, value.to_string());
    }

    fn disk_number(&self) -> Option<u32> {
        self.file.disk
    }

    fn disk_total(&self) -> Option<u32> {
        self.file.disk_total
    }

    fn set_disk_number(&mut self, disk: u16) {
        self.file.disk = Some(u32::from(disk));
        self.file.disk_total = None;
    }

    fn save(&mut self) -> Result<()> {
        if self.file.read_only {
            return Err(MetadataError::WriteError(format!(
                "{} is read-only",
                self.path.display()
            )));
        }

        self.store
            .lock()
            .map_err(|_| MetadataError::WriteError("memory store poisoned".to_string()))?
            .insert(self.path.clone(), self.file.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_are_invisible_until_saved() {
        let backend = MemoryBackend::new();
        let path = Path::new("/lib/a.m4b");
        backend.insert(path, MemoryFile::new().with_text(TextAtom::Title, "Old"));

        let mut atoms = backend.open(path).unwrap();
        atoms.set_text(TextAtom::Title, "New");
        assert_eq!(backend.get(path).unwrap().text[&TextAtom::Title], "Old");

        atoms.save().unwrap();
        assert_eq!(backend.get(path).unwrap().text[&TextAtom::Title], "New");
    }

    #[test]
    fn read_only_file_rejects_save() {
        let backend = MemoryBackend::new();
        let path = Path::new("/lib/locked.m4b");
        backend.insert(
            path,
            MemoryFile {
                read_only: true,
                ..MemoryFile::new()
            },
        );

        let mut atoms = backend.open(path).unwrap();
        atoms.set_disk_number(2);
        assert!(matches!(atoms.save(), Err(MetadataError::WriteError(_))));
        assert_eq!(backend.get(path).unwrap().disk, None);
    }

    #[test]
    fn unknown_and_unreadable_paths_fail_to_open() {
        let backend = MemoryBackend::new();
        assert!(matches!(
            backend.open(Path::new("/missing.m4b")),
            Err(MetadataError::FileNotFound(_))
        ));

        backend.insert(
            "/damaged.m4b",
            MemoryFile {
                unreadable: true,
                ..MemoryFile::new()
            },
        );
        assert!(matches!(
            backend.open(Path::new("/damaged.m4b")),
            Err(MetadataError::UnsupportedContainer(_))
        ));
    }
}
