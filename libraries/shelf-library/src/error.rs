/// Library errors
use shelf_core::ShelfError;
use shelf_metadata::MetadataError;
use thiserror::Error;

/// Result type alias using `LibraryError`
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Errors from discovery, indexing and orchestration
#[derive(Error, Debug)]
pub enum LibraryError {
    /// The library root does not exist
    #[error("Library root not found: {0}")]
    RootNotFound(String),

    /// The library root is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// The library root exists but its listing cannot be read
    #[error("Cannot read library root {root}: {source}")]
    RootUnreadable {
        root: String,
        #[source]
        source: walkdir::Error,
    },

    /// A sync scope named something the index does not hold
    #[error("Not in library: {0}")]
    NotInLibrary(String),

    /// Work was cancelled before it completed
    #[error("Operation cancelled")]
    Cancelled,

    /// Metadata errors
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Core errors
    #[error(transparent)]
    Core(#[from] ShelfError),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<LibraryError> for ShelfError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::Cancelled => ShelfError::Cancelled,
            LibraryError::Core(inner) => inner,
            LibraryError::Io(inner) => ShelfError::Io(inner),
            other => ShelfError::library(other.to_string()),
        }
    }
}
