use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use cask_crypto::ContentHasher;

use crate::checksum::RollingChecksum;
use crate::error::{DeltaError, DeltaResult};

/// Default signature block size.
pub const DEFAULT_BLOCK_SIZE: usize = 2048;

/// Weak + strong checksum for one basis block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSignature {
    /// Block position in the basis (offset = index * block_size).
    pub index: u32,
    /// Rolling weak checksum over the block.
    pub weak: u32,
    /// Domain-separated BLAKE3 strong hash over the block.
    pub strong: [u8; 32],
}

/// Block-signature summary of a basis payload.
///
/// Deterministic for identical input: the same basis and block size always
/// produce the same signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub block_size: u32,
    pub basis_len: u64,
    pub blocks: Vec<BlockSignature>,
}

impl Signature {
    /// Compute the signature of a basis payload.
    pub fn compute(basis: &[u8], block_size: usize) -> Self {
        let blocks = basis
            .chunks(block_size)
            .enumerate()
            .map(|(i, block)| BlockSignature {
                index: i as u32,
                weak: RollingChecksum::over(block).digest(),
                strong: *ContentHasher::BLOCK.hash(block).as_bytes(),
            })
            .collect();
        Self {
            block_size: block_size as u32,
            basis_len: basis.len() as u64,
            blocks,
        }
    }

    /// Serialize to a compact binary blob.
    pub fn to_bytes(&self) -> DeltaResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| DeltaError::Serialization(e.to_string()))
    }

    /// Deserialize from a binary blob.
    pub fn from_bytes(data: &[u8]) -> DeltaResult<Self> {
        bincode::deserialize(data).map_err(|e| DeltaError::CorruptSignature(e.to_string()))
    }

    /// Build a weak-checksum lookup index over the full-size blocks.
    pub fn weak_index(&self) -> HashMap<u32, Vec<&BlockSignature>> {
        let mut index: HashMap<u32, Vec<&BlockSignature>> = HashMap::new();
        let full_blocks = (self.basis_len / self.block_size as u64) as u32;
        for block in &self.blocks {
            // The trailing short block (if any) never matches a full-size
            // window, so it is left out of the index.
            if block.index < full_blocks {
                index.entry(block.weak).or_default().push(block);
            }
        }
        index
    }
}
