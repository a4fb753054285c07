use serde::{Deserialize, Serialize};

use cask_types::FormatVersion;

/// The fixed 12-byte magic signature: 4 ASCII tag bytes, 4 bytes encoding
/// the format's birth date (year little-endian, month, day), 4 salt bytes.
pub const MAGIC: [u8; 12] = [
    b'C', b'A', b'S', b'K', // format tag
    0xE9, 0x07, 0x06, 0x01, // 2025-06-01
    0x5A, 0xC3, 0x19, 0x7D, // salt
];

/// The format version this library writes.
pub const CURRENT_VERSION: FormatVersion = FormatVersion::new(1, 0, 0);

/// Fixed, versioned file header.
///
/// Process-wide constant: constructed once per file via [`current`] and
/// never mutated. The signature is the format fingerprint checked on read,
/// independently of the whole-file digest.
///
/// [`current`]: Self::current
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHeader {
    signature: [u8; 12],
    version: FormatVersion,
}

impl FileHeader {
    /// The header written by this library version.
    pub fn current() -> Self {
        Self {
            signature: MAGIC,
            version: CURRENT_VERSION,
        }
    }

    /// The 12-byte magic signature.
    pub fn signature(&self) -> &[u8; 12] {
        &self.signature
    }

    /// The format version recorded in this header.
    pub fn version(&self) -> FormatVersion {
        self.version
    }

    /// Whether the signature matches the expected process-wide constant.
    pub fn signature_matches(&self) -> bool {
        self.signature == MAGIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_header_matches_magic() {
        let header = FileHeader::current();
        assert!(header.signature_matches());
        assert_eq!(header.version(), FormatVersion::new(1, 0, 0));
    }

    #[test]
    fn magic_layout() {
        assert_eq!(&MAGIC[0..4], b"CASK");
        assert_eq!(MAGIC.len(), 12);
    }

    #[test]
    fn foreign_signature_detected() {
        let mut header = FileHeader::current();
        header.signature[0] = b'X';
        assert!(!header.signature_matches());
    }

    #[test]
    fn serde_roundtrip() {
        let header = FileHeader::current();
        let json = serde_json::to_string(&header).unwrap();
        let parsed: FileHeader = serde_json::from_str(&json).unwrap();
        assert_eq!(header, parsed);
    }
}
