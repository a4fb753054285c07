use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::Storage;

/// In-memory, HashMap-based storage.
///
/// Intended for tests and embedding. Streams are held in memory behind a
/// `RwLock` and cloned on read/write.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
}

impl InMemoryStorage {
    /// Create a new empty in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored streams.
    pub fn len(&self) -> usize {
        self.files.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.files.read().expect("lock poisoned").is_empty()
    }

    /// Remove all stored streams.
    pub fn clear(&self) {
        self.files.write().expect("lock poisoned").clear();
    }
}

impl Storage for InMemoryStorage {
    fn write_stream(&self, path: &Path, data: &[u8]) -> StoreResult<()> {
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidPath("empty path".into()));
        }
        self.files
            .write()
            .expect("lock poisoned")
            .insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn read_stream(&self, path: &Path) -> StoreResult<Vec<u8>> {
        self.files
            .read()
            .expect("lock poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_path_buf()))
    }

    fn delete(&self, path: &Path) -> StoreResult<bool> {
        Ok(self
            .files
            .write()
            .expect("lock poisoned")
            .remove(path)
            .is_some())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().expect("lock poisoned").contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_roundtrip() {
        let storage = InMemoryStorage::new();
        let path = Path::new("/virtual/file.dbf");
        storage.write_stream(path, b"payload").unwrap();
        assert_eq!(storage.read_stream(path).unwrap(), b"payload");
    }

    #[test]
    fn read_missing_is_not_found() {
        let storage = InMemoryStorage::new();
        let err = storage.read_stream(Path::new("/nope")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn overwrite_replaces_content() {
        let storage = InMemoryStorage::new();
        let path = Path::new("/file");
        storage.write_stream(path, b"first").unwrap();
        storage.write_stream(path, b"second").unwrap();
        assert_eq!(storage.read_stream(path).unwrap(), b"second");
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn delete_reports_existence() {
        let storage = InMemoryStorage::new();
        let path = Path::new("/file");
        storage.write_stream(path, b"bytes").unwrap();
        assert!(storage.delete(path).unwrap());
        assert!(!storage.delete(path).unwrap());
        assert!(storage.is_empty());
    }

    #[test]
    fn exists_tracks_writes() {
        let storage = InMemoryStorage::new();
        let path = Path::new("/file");
        assert!(!storage.exists(path));
        storage.write_stream(path, b"x").unwrap();
        assert!(storage.exists(path));
    }
}
