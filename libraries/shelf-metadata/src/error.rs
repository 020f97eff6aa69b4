/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Container is not an MP4 atom container, or is damaged
    #[error("Unsupported container: {0}")]
    UnsupportedContainer(String),

    /// Sidecar parsing error
    #[error("Sidecar parsing error: {0}")]
    SidecarParse(String),

    /// Tag writing error
    #[error("Tag writing error: {0}")]
    WriteError(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),

    /// JSON error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<MetadataError> for shelf_core::ShelfError {
    fn from(err: MetadataError) -> Self {
        shelf_core::ShelfError::metadata(err.to_string())
    }
}
