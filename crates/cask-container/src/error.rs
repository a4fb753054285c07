use cask_types::PayloadKind;

/// Errors from container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// `set` was called with a null or zero-length payload.
    #[error("payload is empty")]
    EmptyPayload,

    /// `get` was called before any data was set.
    #[error("container '{0}' has no data")]
    NoData(String),

    /// A container is populated exactly once; a second `set` is rejected.
    #[error("container '{0}' already has data")]
    DataAlreadySet(String),

    /// A strategy received a payload shape it does not handle.
    #[error("unsupported payload shape: {0}")]
    UnsupportedType(String),

    /// No registered strategy claims the payload kind.
    #[error("no container strategy for payload kind: {0}")]
    StrategyNotFound(PayloadKind),

    /// Stored bytes no longer match the recorded content hash.
    #[error("content hash mismatch: expected {expected}, computed {computed}")]
    Integrity { expected: String, computed: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("compression failed: {0}")]
    Compression(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for container operations.
pub type ContainerResult<T> = Result<T, ContainerError>;
