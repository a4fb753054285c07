use serde::{Deserialize, Serialize};

use cask_crypto::ContentHasher;

use crate::checksum::RollingChecksum;
use crate::error::{DeltaError, DeltaResult};
use crate::signature::{Signature, DEFAULT_BLOCK_SIZE};

/// One instruction in a delta stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaOp {
    /// Copy a full-size block from the basis.
    Copy { block_index: u32, len: u32 },
    /// Insert literal bytes, CRC-checked on apply.
    Literal { data: Vec<u8>, crc32: u32 },
}

/// A decoded delta stream: the recipe transforming a basis into the target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaScript {
    pub block_size: u32,
    pub target_len: u64,
    pub ops: Vec<DeltaOp>,
}

/// Stateless signature/delta/apply engine.
///
/// All state is call-scoped; the engine only carries its block size.
#[derive(Clone, Copy, Debug)]
pub struct DeltaEngine {
    block_size: usize,
}

impl DeltaEngine {
    /// Create an engine with an explicit block size.
    pub fn new(block_size: usize) -> DeltaResult<Self> {
        if block_size == 0 {
            return Err(DeltaError::EngineUnavailable(
                "block size must be non-zero".into(),
            ));
        }
        Ok(Self { block_size })
    }

    /// The engine's block size.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Build a block signature over the basis payload.
    pub fn signature(&self, basis: &[u8]) -> DeltaResult<Vec<u8>> {
        if basis.is_empty() {
            return Err(DeltaError::EmptyInput("basis"));
        }
        Signature::compute(basis, self.block_size).to_bytes()
    }

    /// Compute a delta transforming the signature's basis into `new`.
    pub fn delta(&self, signature_bytes: &[u8], new: &[u8]) -> DeltaResult<Vec<u8>> {
        if signature_bytes.is_empty() {
            return Err(DeltaError::EmptyInput("signature"));
        }
        if new.is_empty() {
            return Err(DeltaError::EmptyInput("new payload"));
        }
        let signature = Signature::from_bytes(signature_bytes)?;
        let index = signature.weak_index();
        let n = signature.block_size as usize;

        let mut ops = Vec::new();
        let mut literal = Vec::new();
        let mut pos = 0usize;
        let mut roll = RollingChecksum::default();
        let mut window_valid = false;

        while pos + n <= new.len() {
            if !window_valid {
                roll = RollingChecksum::over(&new[pos..pos + n]);
                window_valid = true;
            }
            let matched = index.get(&roll.digest()).and_then(|candidates| {
                let strong = *ContentHasher::BLOCK.hash(&new[pos..pos + n]).as_bytes();
                candidates.iter().find(|b| b.strong == strong).copied()
            });
            if let Some(block) = matched {
                flush_literal(&mut ops, &mut literal);
                ops.push(DeltaOp::Copy {
                    block_index: block.index,
                    len: n as u32,
                });
                pos += n;
                window_valid = false;
            } else {
                literal.push(new[pos]);
                if pos + n < new.len() {
                    roll.roll(new[pos], new[pos + n]);
                } else {
                    window_valid = false;
                }
                pos += 1;
            }
        }
        literal.extend_from_slice(&new[pos..]);
        flush_literal(&mut ops, &mut literal);

        let script = DeltaScript {
            block_size: signature.block_size,
            target_len: new.len() as u64,
            ops,
        };
        bincode::serialize(&script).map_err(|e| DeltaError::Serialization(e.to_string()))
    }

    /// Replay a delta against the basis to reconstruct the target payload.
    ///
    /// Basis authenticity is not re-verified here; only the delta's own
    /// literal checksums and copy bounds are checked.
    pub fn apply(&self, basis: &[u8], delta_bytes: &[u8]) -> DeltaResult<Vec<u8>> {
        if basis.is_empty() {
            return Err(DeltaError::EmptyInput("basis"));
        }
        if delta_bytes.is_empty() {
            return Err(DeltaError::EmptyInput("delta"));
        }
        let script: DeltaScript = bincode::deserialize(delta_bytes)
            .map_err(|e| DeltaError::CorruptDelta(e.to_string()))?;

        let mut out = Vec::with_capacity(script.target_len as usize);
        for op in &script.ops {
            match op {
                DeltaOp::Copy { block_index, len } => {
                    let offset = *block_index as u64 * script.block_size as u64;
                    let end = offset + *len as u64;
                    if end > basis.len() as u64 {
                        return Err(DeltaError::CopyOutOfRange {
                            block_index: *block_index,
                            offset,
                            basis_len: basis.len() as u64,
                        });
                    }
                    out.extend_from_slice(&basis[offset as usize..end as usize]);
                }
                DeltaOp::Literal { data, crc32 } => {
                    if crc32fast::hash(data) != *crc32 {
                        return Err(DeltaError::LiteralChecksumMismatch);
                    }
                    out.extend_from_slice(data);
                }
            }
        }
        if out.len() as u64 != script.target_len {
            return Err(DeltaError::CorruptDelta(format!(
                "reconstructed {} bytes, expected {}",
                out.len(),
                script.target_len
            )));
        }
        Ok(out)
    }
}

impl Default for DeltaEngine {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

fn flush_literal(ops: &mut Vec<DeltaOp>, literal: &mut Vec<u8>) {
    if literal.is_empty() {
        return;
    }
    let data = std::mem::take(literal);
    ops.push(DeltaOp::Literal {
        crc32: crc32fast::hash(&data),
        data,
    });
}
