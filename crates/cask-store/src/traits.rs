use std::path::Path;

use crate::error::StoreResult;

/// Whole-stream storage backend.
///
/// All implementations must satisfy these invariants:
/// - `write_stream` is create-or-truncate: a successful write replaces any
///   previous content at the path in full. There is no partial-write
///   recovery; a crash mid-write leaves an unusable file.
/// - `read_stream` returns the complete stream or an error, never a prefix.
/// - Concurrent operations on different paths are independent; concurrent
///   writers to the same path are not coordinated here.
/// - All I/O errors are propagated, never silently ignored.
pub trait Storage: Send + Sync {
    /// Write the full byte stream to the path, creating parent directories
    /// as needed.
    fn write_stream(&self, path: &Path, data: &[u8]) -> StoreResult<()>;

    /// Read the full byte stream at the path.
    ///
    /// Returns [`StoreError::NotFound`] if nothing exists there.
    ///
    /// [`StoreError::NotFound`]: crate::StoreError::NotFound
    fn read_stream(&self, path: &Path) -> StoreResult<Vec<u8>>;

    /// Delete the file at the path. Returns `true` if it existed.
    fn delete(&self, path: &Path) -> StoreResult<bool>;

    /// Check whether a file exists at the path.
    fn exists(&self, path: &Path) -> bool;
}
