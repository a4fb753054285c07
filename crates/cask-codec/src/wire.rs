use serde::{Deserialize, Serialize};

use cask_model::{FileMetadata, FileVersion};

/// Wire record for the metadata component.
///
/// The on-disk layout is exactly three framed components (header, metadata,
/// content); the version list rides inside the metadata component so the
/// layout stays fixed.
#[derive(Debug, Serialize, Deserialize)]
pub struct MetadataBlock {
    pub metadata: FileMetadata,
    pub versions: Vec<FileVersion>,
    pub current_version: Option<FileVersion>,
}
