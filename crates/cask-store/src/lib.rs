//! Storage backends for the Cask container format.
//!
//! A Cask file is always written and read as one whole byte stream; the
//! backends here only provide that stream contract. Local filesystem and
//! remote blob storage are interchangeable behind the [`Storage`] trait.
//!
//! # Design Rules
//!
//! 1. Writes are create-or-truncate, single writer. Concurrent writers to
//!    the same path are not coordinated here; callers serialize externally.
//! 2. All I/O errors are propagated, never silently ignored.
//! 3. Cancellation is cooperative and honored between 64 KiB chunks.

pub mod cancel;
pub mod error;
pub mod local;
pub mod memory;
pub mod traits;

pub use cancel::CancelToken;
pub use error::{StoreError, StoreResult};
pub use local::LocalStorage;
pub use memory::InMemoryStorage;
pub use traits::Storage;
