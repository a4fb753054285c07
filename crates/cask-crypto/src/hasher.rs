use std::io::Read;

use cask_types::ContentHash;

/// Chunk size for stream hashing.
const STREAM_CHUNK: usize = 64 * 1024;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g., `"cask-content-v1"`,
/// `"cask-file-v1"`) that is prepended to every hash computation. This
/// prevents cross-type hash collisions: a container payload and a whole-file
/// stream with identical bytes will produce different digests.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for container payloads.
    pub const CONTENT: Self = Self {
        domain: "cask-content-v1",
    };
    /// Hasher for whole-file component streams.
    pub const FILE: Self = Self {
        domain: "cask-file-v1",
    };
    /// Hasher for delta-signature blocks.
    pub const BLOCK: Self = Self {
        domain: "cask-block-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> ContentHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        ContentHash::from_digest(*hasher.finalize().as_bytes())
    }

    /// Hash a byte stream in 64 KiB chunks with domain separation.
    pub fn hash_stream<R: Read>(&self, mut reader: R) -> Result<ContentHash, HasherError> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        let mut chunk = vec![0u8; STREAM_CHUNK];
        loop {
            let n = reader
                .read(&mut chunk)
                .map_err(|e| HasherError::Io(e.to_string()))?;
            if n == 0 {
                break;
            }
            hasher.update(&chunk[..n]);
        }
        Ok(ContentHash::from_digest(*hasher.finalize().as_bytes()))
    }

    /// Hash a serializable value as JSON with domain separation.
    pub fn hash_serialized<T: serde::Serialize>(&self, value: &T) -> Result<ContentHash, HasherError> {
        let data =
            serde_json::to_vec(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(self.hash(&data))
    }

    /// Verify that data produces the expected hash.
    pub fn verify(&self, data: &[u8], expected: &ContentHash) -> bool {
        self.hash(data) == *expected
    }

    /// Raw BLAKE3 hash without domain separation (for low-level use).
    pub fn raw_hash(data: &[u8]) -> [u8; 32] {
        *blake3::hash(data).as_bytes()
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error while hashing stream: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn hash_is_deterministic() {
        let data = b"hello world";
        let h1 = ContentHasher::CONTENT.hash(data);
        let h2 = ContentHasher::CONTENT.hash(data);
        assert_eq!(h1, h2);
    }

    #[test]
    fn different_domains_produce_different_hashes() {
        let data = b"same content";
        let content = ContentHasher::CONTENT.hash(data);
        let file = ContentHasher::FILE.hash(data);
        let block = ContentHasher::BLOCK.hash(data);
        assert_ne!(content, file);
        assert_ne!(content, block);
        assert_ne!(file, block);
    }

    #[test]
    fn stream_hash_matches_buffer_hash() {
        let data = vec![0x5Au8; 200_000];
        let buffered = ContentHasher::FILE.hash(&data);
        let streamed = ContentHasher::FILE.hash_stream(Cursor::new(&data)).unwrap();
        assert_eq!(buffered, streamed);
    }

    #[test]
    fn verify_correct_data() {
        let data = b"test data";
        let hash = ContentHasher::CONTENT.hash(data);
        assert!(ContentHasher::CONTENT.verify(data, &hash));
    }

    #[test]
    fn verify_incorrect_data() {
        let hash = ContentHasher::CONTENT.hash(b"original");
        assert!(!ContentHasher::CONTENT.verify(b"tampered", &hash));
    }

    #[test]
    fn hash_serialized_works() {
        let value = serde_json::json!({"key": "value", "num": 42});
        let hash = ContentHasher::CONTENT.hash_serialized(&value).unwrap();
        assert!(!hash.is_null());
    }

    #[test]
    fn custom_domain() {
        let hasher = ContentHasher::new("my-custom-domain-v1");
        let hash = hasher.hash(b"data");
        assert_ne!(hash, ContentHasher::CONTENT.hash(b"data"));
    }

    #[test]
    fn raw_hash_no_domain() {
        let h1 = ContentHasher::raw_hash(b"test");
        let h2 = ContentHasher::raw_hash(b"test");
        assert_eq!(h1, h2);
        let domain_hash = ContentHasher::CONTENT.hash(b"test");
        assert_ne!(h1, *domain_hash.as_bytes());
    }
}
