//! File discovery for audiobooks

use crate::config::EngineConfig;
use crate::error::{LibraryError, Result};
use shelf_metadata::{load_sidecar, Sidecar};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Scanner for audiobook files under a library root
#[derive(Debug, Clone)]
pub struct FileScanner {
    config: EngineConfig,
}

impl FileScanner {
    /// Create a scanner using the extensions and link policy of `config`
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Recursively find audiobook files under `root`
    ///
    /// Unreadable entries below the root are skipped with a warning, but a
    /// root whose listing cannot be read fails the whole scan. The
    /// returned paths are sorted so progress runs in a stable order; callers
    /// must not rely on that order for anything else.
    pub fn scan_directory(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(LibraryError::RootNotFound(root.display().to_string()));
        }

        if !root.is_dir() {
            return Err(LibraryError::NotADirectory(root.display().to_string()));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(root).follow_links(self.config.follow_links);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(LibraryError::RootUnreadable {
                        root: root.display().to_string(),
                        source: e,
                    });
                }
                Err(e) => {
                    warn!("Skipping unreadable entry under {:?}: {}", root, e);
                    continue;
                }
            };

            let path = entry.path();
            if path.is_file() && self.config.is_audio_file(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        debug!("Discovered {} audiobook files under {:?}", files.len(), root);
        Ok(files)
    }
}

/// Sidecars loaded once per directory
#[derive(Debug, Default)]
pub struct SidecarCache {
    names: Vec<String>,
    loaded: HashMap<PathBuf, Option<Sidecar>>,
}

impl SidecarCache {
    /// Create a cache that looks for `names`, in order
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            loaded: HashMap::new(),
        }
    }

    /// Sidecar governing the file at `path`
    pub fn for_file(&mut self, path: &Path) -> Option<&Sidecar> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let names = &self.names;
        self.loaded
            .entry(dir.to_path_buf())
            .or_insert_with(|| load_sidecar(dir, names))
            .as_ref()
    }

    /// Number of directories looked up so far
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    /// Check if nothing was looked up yet
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}
