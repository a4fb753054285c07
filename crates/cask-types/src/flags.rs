use serde::{Deserialize, Serialize};

/// A single container state flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerFlag {
    /// The container's payload has been set and hashed.
    DataIsSet,
    /// The stored bytes are zstd-compressed.
    Compressed,
    /// The stored bytes are AEAD-encrypted.
    Encrypted,
}

impl ContainerFlag {
    /// Bit position of this flag in the packed byte.
    fn bit(&self) -> u8 {
        match self {
            Self::DataIsSet => 0b0000_0001,
            Self::Compressed => 0b0000_0010,
            Self::Encrypted => 0b0000_0100,
        }
    }
}

/// Byte-packed set of [`ContainerFlag`]s.
///
/// Serialized as a single byte. [`from_bits`](Self::from_bits) rejects
/// unknown bits when reconstructing from raw data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerFlags(u8);

const KNOWN_BITS: u8 = 0b0000_0111;

impl ContainerFlags {
    /// Empty flag set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Set a flag.
    pub fn insert(&mut self, flag: ContainerFlag) {
        self.0 |= flag.bit();
    }

    /// Clear a flag.
    pub fn remove(&mut self, flag: ContainerFlag) {
        self.0 &= !flag.bit();
    }

    /// Check whether a flag is set.
    pub fn contains(&self, flag: ContainerFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// The packed byte value.
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Reconstruct from a packed byte. Returns `None` if unknown bits are set.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !KNOWN_BITS != 0 {
            return None;
        }
        Some(Self(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_flags() {
        let flags = ContainerFlags::empty();
        assert!(!flags.contains(ContainerFlag::DataIsSet));
        assert!(!flags.contains(ContainerFlag::Compressed));
        assert!(!flags.contains(ContainerFlag::Encrypted));
    }

    #[test]
    fn insert_and_contains() {
        let mut flags = ContainerFlags::empty();
        flags.insert(ContainerFlag::DataIsSet);
        flags.insert(ContainerFlag::Compressed);
        assert!(flags.contains(ContainerFlag::DataIsSet));
        assert!(flags.contains(ContainerFlag::Compressed));
        assert!(!flags.contains(ContainerFlag::Encrypted));
    }

    #[test]
    fn remove_clears_only_that_flag() {
        let mut flags = ContainerFlags::empty();
        flags.insert(ContainerFlag::DataIsSet);
        flags.insert(ContainerFlag::Encrypted);
        flags.remove(ContainerFlag::DataIsSet);
        assert!(!flags.contains(ContainerFlag::DataIsSet));
        assert!(flags.contains(ContainerFlag::Encrypted));
    }

    #[test]
    fn bits_roundtrip() {
        let mut flags = ContainerFlags::empty();
        flags.insert(ContainerFlag::Compressed);
        let restored = ContainerFlags::from_bits(flags.bits()).unwrap();
        assert_eq!(flags, restored);
    }

    #[test]
    fn from_bits_rejects_unknown() {
        assert!(ContainerFlags::from_bits(0b1000_0000).is_none());
        assert!(ContainerFlags::from_bits(0b0000_0111).is_some());
    }
}
