/// Core error types for Shelf
use thiserror::Error;

/// Result type alias using `ShelfError`
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Core error type for Shelf
#[derive(Error, Debug)]
pub enum ShelfError {
    /// Series index text is not a non-negative decimal
    #[error("Invalid series index: {0:?}")]
    InvalidSeriesIndex(String),

    /// Metadata read/write errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Library scan/sync errors
    #[error("Library error: {0}")]
    Library(String),

    /// Work was cancelled before it completed
    #[error("Operation cancelled")]
    Cancelled,

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl ShelfError {
    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Create a library error
    pub fn library(msg: impl Into<String>) -> Self {
        Self::Library(msg.into())
    }
}
