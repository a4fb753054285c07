//! Content containers for the Cask format.
//!
//! A [`ContentContainer`] wraps one logical payload: its declared type, the
//! stored bytes (after the processing pipeline has run), and a content hash
//! covering exactly those stored bytes. Containers are populated once and
//! are immutable afterwards, except for explicit recompression.
//!
//! # Processing pipeline
//!
//! `set` runs serialize → compress → encrypt, in that order; `get` verifies
//! the hash, then runs decrypt → decompress → deserialize. The hash always
//! covers the final stored bytes, so verification is symmetric with storage.
//!
//! # Construction
//!
//! The [`ContainerFactory`] dispatches a name/payload/compress request to
//! exactly one [`ContainerStrategy`] per payload kind. Strategies are
//! stateless and share an explicitly passed [`BufferPool`].

pub mod compress;
pub mod container;
pub mod encrypt;
pub mod error;
pub mod factory;
pub mod pipeline;
pub mod pool;

pub use compress::{Compressor, ZstdCompressor};
pub use container::ContentContainer;
pub use encrypt::{Encryptor, XChaChaEncryptor};
pub use error::{ContainerError, ContainerResult};
pub use factory::{BuildRequest, ContainerFactory, ContainerStrategy, Payload};
pub use pipeline::{Pipeline, WireFormat};
pub use pool::{BufferPool, PooledBuf};
