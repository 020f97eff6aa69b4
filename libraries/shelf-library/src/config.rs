/// Engine configuration
use serde::{Deserialize, Serialize};
use shelf_core::{AuthorPolicy, GroupingStyle};
use std::ffi::OsStr;
use std::path::Path;

/// Settings passed to the engine at construction
///
/// The engine holds no other state; everything it needs per run is either
/// here or an argument of the call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Audio file extensions, matched case-insensitively
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Sidecar file names, tried in order in each book's directory
    #[serde(default = "default_sidecar_names")]
    pub sidecar_names: Vec<String>,

    /// Follow symbolic links during discovery
    #[serde(default)]
    pub follow_links: bool,

    /// How a sidecar author list becomes one author
    #[serde(default)]
    pub author_policy: AuthorPolicy,

    /// What the synchronizer writes into the grouping atom
    #[serde(default)]
    pub grouping_style: GroupingStyle,
}

impl EngineConfig {
    /// Check if `path` has one of the configured audio extensions
    pub fn is_audio_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

fn default_extensions() -> Vec<String> {
    vec!["m4b".to_string(), "m4a".to_string()]
}

fn default_sidecar_names() -> Vec<String> {
    vec!["metadata.json".to_string(), "abs_metadata.json".to_string()]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            sidecar_names: default_sidecar_names(),
            follow_links: false,
            author_policy: AuthorPolicy::default(),
            grouping_style: GroupingStyle::default(),
        }
    }
}
