use std::path::PathBuf;

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested file was not found.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// The given path is empty or otherwise unusable.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The operation was cancelled between chunks.
    #[error("operation cancelled")]
    Cancelled,

    /// I/O error from the underlying backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
