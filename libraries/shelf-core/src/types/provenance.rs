/// Provenance of a resolved record
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which source supplied a record's metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataOrigin {
    /// Embedded atoms only
    Tag,
    /// Sidecar only
    Json,
    /// Sidecar present, at least one field came from embedded atoms
    Mixed,
    /// Neither source was readable; every field is a model default
    Defaults,
}

impl MetadataOrigin {
    /// Label used in listings
    pub fn label(self) -> &'static str {
        match self {
            MetadataOrigin::Tag => "Tag",
            MetadataOrigin::Json => "Json",
            MetadataOrigin::Mixed => "Mixed",
            MetadataOrigin::Defaults => "Defaults",
        }
    }
}

/// Metadata-source lineage of a record
///
/// `file_number_fallback` marks a series index recovered from digits in the
/// filename rather than from any tag. Presentation can use it to flag
/// low-confidence ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance {
    /// Source lineage
    pub origin: MetadataOrigin,

    /// Series index came from the filename
    pub file_number_fallback: bool,
}

impl Provenance {
    /// Suffix appended to the label when the filename supplied the index
    pub const FILE_NUMBER_FALLBACK: &'static str = "+FileNumberFallback";

    /// Provenance without the fallback marker
    pub fn new(origin: MetadataOrigin) -> Self {
        Self {
            origin,
            file_number_fallback: false,
        }
    }

    /// Set the filename fallback marker
    pub fn with_file_number_fallback(mut self, used: bool) -> Self {
        self.file_number_fallback = used;
        self
    }
}

impl Default for Provenance {
    fn default() -> Self {
        Self::new(MetadataOrigin::Tag)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.origin.label())?;
        if self.file_number_fallback {
            f.write_str(Self::FILE_NUMBER_FALLBACK)?;
        }
        Ok(())
    }
}
