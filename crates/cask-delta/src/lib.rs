//! Delta engine for the Cask container format.
//!
//! Implements the rsync-style signature/delta/apply protocol: a compact
//! block signature summarizes a basis payload, a delta describes how to
//! transform that basis into a new payload, and apply replays the delta
//! against the basis to reconstruct the new payload.
//!
//! All three operations are pure and stateless; engine state never outlives
//! a call. Patch application does not re-verify basis authenticity — callers
//! needing that guarantee hash-compare the reconstructed output themselves.

pub mod checksum;
pub mod engine;
pub mod error;
pub mod signature;

pub use checksum::RollingChecksum;
pub use engine::{DeltaEngine, DeltaOp, DeltaScript};
pub use error::{DeltaError, DeltaResult};
pub use signature::{BlockSignature, Signature, DEFAULT_BLOCK_SIZE};
