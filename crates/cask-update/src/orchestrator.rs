use std::path::Path;
use std::sync::Arc;

use cask_codec::{FileReader, FileWriter};
use cask_container::Pipeline;
use cask_delta::DeltaEngine;
use cask_model::FileModel;
use cask_store::Storage;

use crate::error::{UpdateError, UpdateResult};

/// Which write path the orchestrator took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateMode {
    FullRewrite,
    Delta,
}

/// The orchestrator's state machine.
///
/// `Idle → Validating → Reading → {DeltaMode | FullRewriteMode} → Writing →
/// Done`, with `Failed(reason)` absorbing from any state. No partial
/// recovery: a failed update is retried whole by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateState {
    Idle,
    Validating,
    Reading,
    DeltaMode,
    FullRewriteMode,
    Writing,
    Done,
    Failed(String),
}

/// Caller-set update options. The write mode is an explicit choice, never
/// inferred from content size.
#[derive(Clone, Copy, Debug, Default)]
pub struct UpdateOptions {
    pub use_delta_encoding: bool,
}

/// What an update did.
#[derive(Clone, Debug)]
pub struct UpdateReport {
    pub mode: UpdateMode,
    pub bytes_written: u64,
    pub delta_bytes: Option<u64>,
}

/// Reads the existing file, rewrites it in full or patches it with a binary
/// delta, and writes the result back (delete-then-write).
pub struct UpdateOrchestrator {
    storage: Arc<dyn Storage>,
    engine: DeltaEngine,
    pipeline: Pipeline,
    state: UpdateState,
}

impl UpdateOrchestrator {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            engine: DeltaEngine::default(),
            pipeline: Pipeline::default(),
            state: UpdateState::Idle,
        }
    }

    /// Use a specific delta engine.
    pub fn with_engine(mut self, engine: DeltaEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Use a specific pipeline when reading the existing file.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// The current state.
    pub fn state(&self) -> &UpdateState {
        &self.state
    }

    /// Run one update attempt against the file at `path`.
    pub fn update(
        &mut self,
        path: &Path,
        new_model: &FileModel,
        options: &UpdateOptions,
    ) -> UpdateResult<UpdateReport> {
        match self.run(path, new_model, options) {
            Ok(report) => {
                self.state = UpdateState::Done;
                Ok(report)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "update failed");
                self.state = UpdateState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    fn run(
        &mut self,
        path: &Path,
        new_model: &FileModel,
        options: &UpdateOptions,
    ) -> UpdateResult<UpdateReport> {
        self.state = UpdateState::Validating;
        if path.as_os_str().is_empty() {
            return Err(UpdateError::InvalidPath("path is empty".into()));
        }
        if !self.storage.exists(path) {
            return Err(UpdateError::InvalidPath(format!(
                "no existing file at {}",
                path.display()
            )));
        }

        self.state = UpdateState::Reading;
        let reader = FileReader::new(self.storage.clone()).with_pipeline(self.pipeline.clone());
        let existing = reader.read(path).map_err(UpdateError::Read)?;
        let writer = FileWriter::new(self.storage.clone());

        if options.use_delta_encoding {
            self.state = UpdateState::DeltaMode;
            tracing::info!(
                path = %path.display(),
                existing_contents = existing.contents().len(),
                "delta-encoded update"
            );

            let basis = writer.encode(&existing).map_err(UpdateError::Write)?;
            let signature = self.engine.signature(&basis)?;
            let new_bytes = writer.encode(new_model).map_err(UpdateError::Write)?;
            let delta = self.engine.delta(&signature, &new_bytes)?;
            // The delta already encodes the full replacement byte stream, so
            // the patched result is written directly, bypassing framing.
            let patched = self.engine.apply(&basis, &delta)?;

            if let Some(version) = new_model.current_version() {
                self.storage
                    .write_stream(version.signature_path(), &signature)?;
                self.storage.write_stream(version.delta_path(), &delta)?;
            }

            self.state = UpdateState::Writing;
            self.storage.delete(path)?;
            self.storage.write_stream(path, &patched)?;
            Ok(UpdateReport {
                mode: UpdateMode::Delta,
                bytes_written: patched.len() as u64,
                delta_bytes: Some(delta.len() as u64),
            })
        } else {
            self.state = UpdateState::FullRewriteMode;
            tracing::info!(path = %path.display(), "full rewrite update");

            let bytes = writer.encode(new_model).map_err(UpdateError::Write)?;
            self.state = UpdateState::Writing;
            self.storage.delete(path)?;
            self.storage.write_stream(path, &bytes)?;
            Ok(UpdateReport {
                mode: UpdateMode::FullRewrite,
                bytes_written: bytes.len() as u64,
                delta_bytes: None,
            })
        }
    }
}
