use cask_model::ModelError;
use cask_store::StoreError;
use cask_types::FormatVersion;

/// Errors from the file codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Storage backend failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Whole-file digest mismatch: the single authoritative corruption and
    /// tamper check.
    #[error("whole-file digest mismatch: expected {expected}, computed {computed}")]
    Integrity { expected: String, computed: String },

    /// The header's magic signature does not match this format.
    #[error("format signature mismatch: expected {expected}, got {actual}")]
    FormatMismatch { expected: String, actual: String },

    /// The header's major format version is not understood.
    #[error("unsupported format version: {0}")]
    UnsupportedVersion(FormatVersion),

    /// The byte stream cannot be walked as framed components.
    #[error("corrupt file at offset {offset}: {reason}")]
    CorruptFile { offset: usize, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Model invariant violated before write or during reassembly.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
