use cask_container::ContainerError;

/// Errors from file model operations.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Bad argument: empty author, label, or path.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Two containers with the same name in one file.
    #[error("duplicate content name: {0}")]
    DuplicateContent(String),

    /// A container without data cannot join a serializable model.
    #[error("container '{0}' has no data set")]
    MissingData(String),

    /// Container construction or access failed.
    #[error(transparent)]
    Container(#[from] ContainerError),
}

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
