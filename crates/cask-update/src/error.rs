use cask_codec::CodecError;
use cask_delta::DeltaError;
use cask_store::StoreError;

/// Errors from the update orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The target path is empty or does not point at an existing file.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The existing file could not be read and verified.
    #[error("failed to read existing file: {0}")]
    Read(CodecError),

    /// The new content could not be encoded or written.
    #[error("failed to encode new content: {0}")]
    Write(CodecError),

    /// Signature, delta, or apply failed.
    #[error("delta engine failure: {0}")]
    Delta(#[from] DeltaError),

    /// Storage backend failure.
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for update operations.
pub type UpdateResult<T> = Result<T, UpdateError>;
