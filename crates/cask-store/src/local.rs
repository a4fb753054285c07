use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::cancel::CancelToken;
use crate::error::{StoreError, StoreResult};
use crate::traits::Storage;

/// Chunk size for cancellable reads and writes.
const IO_CHUNK: usize = 64 * 1024;

/// Local filesystem storage.
///
/// Reads and writes run in 64 KiB chunks, checking the attached
/// [`CancelToken`] between chunks.
#[derive(Clone, Debug, Default)]
pub struct LocalStorage {
    cancel: CancelToken,
}

impl LocalStorage {
    /// Create a storage backend with a fresh (never-cancelled) token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage backend observing the given cancellation token.
    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self { cancel }
    }

    fn check_cancel(&self) -> StoreResult<()> {
        if self.cancel.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        Ok(())
    }
}

impl Storage for LocalStorage {
    fn write_stream(&self, path: &Path, data: &[u8]) -> StoreResult<()> {
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidPath("empty path".into()));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = File::create(path)?;
        for chunk in data.chunks(IO_CHUNK) {
            self.check_cancel()?;
            file.write_all(chunk)?;
        }
        file.flush()?;
        Ok(())
    }

    fn read_stream(&self, path: &Path) -> StoreResult<Vec<u8>> {
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        let mut chunk = vec![0u8; IO_CHUNK];
        loop {
            self.check_cancel()?;
            let n = file.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            data.extend_from_slice(&chunk[..n]);
        }
        Ok(data)
    }

    fn delete(&self, path: &Path) -> StoreResult<bool> {
        if !path.exists() {
            tracing::warn!("delete of missing path {:?}", path);
            return Ok(false);
        }
        std::fs::remove_file(path)?;
        Ok(true)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
