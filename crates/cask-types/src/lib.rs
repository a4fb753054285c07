//! Foundation types for the Cask container format.
//!
//! This crate provides the identity and descriptor types used throughout the
//! Cask system. Every other Cask crate depends on `cask-types`.
//!
//! # Key Types
//!
//! - [`ContentHash`] — Content-addressed integrity digest (BLAKE3 hash)
//! - [`PayloadKind`] — Tagged union over the supported payload shapes
//! - [`TypeDescriptor`] — Logical type information for a stored payload
//! - [`ContainerFlags`] — Byte-packed container state flags
//! - [`FormatVersion`] — Three-part on-disk format version

pub mod descriptor;
pub mod error;
pub mod flags;
pub mod hash;
pub mod version;

pub use descriptor::{PayloadKind, TypeDescriptor};
pub use error::TypeError;
pub use flags::{ContainerFlag, ContainerFlags};
pub use hash::ContentHash;
pub use version::FormatVersion;
