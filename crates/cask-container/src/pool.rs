use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};

/// Default pooled buffer size (64 KiB).
const DEFAULT_BUF_SIZE: usize = 64 * 1024;

/// Shared pool of reusable byte buffers.
///
/// Passed explicitly to whoever needs scratch space (no process-wide
/// statics). Buffers are returned to the pool when the [`PooledBuf`] guard
/// drops, on every exit path.
#[derive(Clone, Debug)]
pub struct BufferPool {
    buffers: Arc<Mutex<Vec<Vec<u8>>>>,
    buf_size: usize,
}

impl BufferPool {
    /// Create a pool handing out buffers of the given size.
    pub fn new(buf_size: usize) -> Self {
        Self {
            buffers: Arc::new(Mutex::new(Vec::new())),
            buf_size,
        }
    }

    /// Acquire a buffer, reusing a pooled one when available.
    pub fn acquire(&self) -> PooledBuf {
        let buf = self
            .buffers
            .lock()
            .expect("lock poisoned")
            .pop()
            .unwrap_or_else(|| vec![0u8; self.buf_size]);
        PooledBuf {
            buf: Some(buf),
            pool: self.clone(),
        }
    }

    /// Number of idle buffers currently pooled.
    pub fn idle(&self) -> usize {
        self.buffers.lock().expect("lock poisoned").len()
    }

    fn release(&self, mut buf: Vec<u8>) {
        buf.resize(self.buf_size, 0);
        self.buffers.lock().expect("lock poisoned").push(buf);
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_BUF_SIZE)
    }
}

/// RAII guard over a pooled buffer; returns it to the pool on drop.
pub struct PooledBuf {
    buf: Option<Vec<u8>>,
    pool: BufferPool,
}

impl Deref for PooledBuf {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        self.buf.as_ref().expect("buffer taken")
    }
}

impl DerefMut for PooledBuf {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        self.buf.as_mut().expect("buffer taken")
    }
}

impl Drop for PooledBuf {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.release(buf);
        }
    }
}
