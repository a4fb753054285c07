//! Hashing service for the Cask container format.
//!
//! Provides domain-separated BLAKE3 hashing over byte buffers and chunked
//! streams. Every integrity check in the system goes through this crate.
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod hasher;

pub use hasher::{ContentHasher, HasherError};
