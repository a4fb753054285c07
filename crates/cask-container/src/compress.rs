use crate::error::{ContainerError, ContainerResult};

/// Byte-in/byte-out compression stage.
pub trait Compressor: Send + Sync {
    fn compress(&self, data: &[u8]) -> ContainerResult<Vec<u8>>;
    fn decompress(&self, data: &[u8]) -> ContainerResult<Vec<u8>>;
}

/// zstd compressor.
#[derive(Clone, Copy, Debug)]
pub struct ZstdCompressor {
    level: i32,
}

impl ZstdCompressor {
    /// Create a compressor with an explicit zstd level.
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Default for ZstdCompressor {
    fn default() -> Self {
        Self { level: 3 }
    }
}

impl Compressor for ZstdCompressor {
    fn compress(&self, data: &[u8]) -> ContainerResult<Vec<u8>> {
        zstd::encode_all(data, self.level).map_err(|e| ContainerError::Compression(e.to_string()))
    }

    fn decompress(&self, data: &[u8]) -> ContainerResult<Vec<u8>> {
        zstd::decode_all(data).map_err(|e| ContainerError::Compression(e.to_string()))
    }
}
