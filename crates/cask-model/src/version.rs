use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// An immutable record of one declared file version.
///
/// Carries the artifact paths the delta-versioning workflow uses: the basis
/// payload, the new payload, the computed delta, and the basis signature,
/// all rooted under `base_dir`. Ordering is by date; the label is a display
/// tie-break only. A version is never mutated — it is superseded by adding
/// a newer one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVersion {
    label: String,
    date: DateTime<Utc>,
    base_dir: PathBuf,
    basis_path: PathBuf,
    new_path: PathBuf,
    delta_path: PathBuf,
    signature_path: PathBuf,
}

impl FileVersion {
    /// Declare a version with derived artifact paths.
    pub fn new(label: impl Into<String>, base_dir: impl Into<PathBuf>) -> ModelResult<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ModelError::Validation("version label is empty".into()));
        }
        let base_dir = base_dir.into();
        if base_dir.as_os_str().is_empty() {
            return Err(ModelError::Validation("version base dir is empty".into()));
        }
        Ok(Self {
            basis_path: base_dir.join(format!("{label}.basis.dbf")),
            new_path: base_dir.join(format!("{label}.new.dbf")),
            delta_path: base_dir.join(format!("{label}.delta.bin")),
            signature_path: base_dir.join(format!("{label}.sig.bin")),
            label,
            date: Utc::now(),
            base_dir,
        })
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Declaration timestamp.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Root directory for this version's artifacts.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the basis payload.
    pub fn basis_path(&self) -> &Path {
        &self.basis_path
    }

    /// Path of the new payload.
    pub fn new_path(&self) -> &Path {
        &self.new_path
    }

    /// Path of the computed delta blob.
    pub fn delta_path(&self) -> &Path {
        &self.delta_path
    }

    /// Path of the basis signature blob.
    pub fn signature_path(&self) -> &Path {
        &self.signature_path
    }

    /// Whether this version supersedes the other ("latest" selection).
    pub fn is_newer_than(&self, other: &FileVersion) -> bool {
        self.date > other.date
    }
}
