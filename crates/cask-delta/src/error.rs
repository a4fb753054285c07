/// Errors from delta engine operations.
#[derive(Debug, thiserror::Error)]
pub enum DeltaError {
    /// A required input was null or zero-length.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// The engine could not be constructed (invalid block size).
    #[error("delta engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The signature blob cannot be decoded.
    #[error("corrupt signature: {0}")]
    CorruptSignature(String),

    /// The delta blob cannot be decoded or replays to the wrong length.
    #[error("corrupt delta: {0}")]
    CorruptDelta(String),

    /// A literal run's CRC32 does not match its recorded checksum.
    #[error("literal checksum mismatch in delta stream")]
    LiteralChecksumMismatch,

    /// A copy op references bytes beyond the basis payload.
    #[error("copy out of range: block {block_index} at offset {offset} beyond basis length {basis_len}")]
    CopyOutOfRange {
        block_index: u32,
        offset: u64,
        basis_len: u64,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for delta operations.
pub type DeltaResult<T> = Result<T, DeltaError>;
