//! Update orchestrator for the Cask container format.
//!
//! Composes the file codec and the delta engine: an update either rewrites
//! the target file through the normal write path or patches its byte stream
//! with a binary delta, chosen explicitly by the caller. One attempt per
//! call; failure is surfaced for the caller to retry whole.

pub mod error;
pub mod orchestrator;

pub use error::{UpdateError, UpdateResult};
pub use orchestrator::{
    UpdateMode, UpdateOptions, UpdateOrchestrator, UpdateReport, UpdateState,
};
