use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cask_container::WireFormat;
use cask_types::ContentHash;

/// File-level metadata: authorship, timestamps, the recorded wire format,
/// and the per-content verification hash index.
///
/// The index is kept in sync by [`FileModel::add_content`]; every container
/// in a serializable model has an entry here.
///
/// [`FileModel::add_content`]: crate::FileModel::add_content
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Stable file identity, assigned at creation.
    pub file_id: Uuid,
    /// Author recorded at creation.
    pub author: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp, bumped by append operations.
    pub modified_at: DateTime<Utc>,
    /// Wire format the file's components are serialized with.
    pub wire: WireFormat,
    /// Content name → verification hash, sorted for deterministic output.
    pub content_index: BTreeMap<String, ContentHash>,
}

impl FileMetadata {
    /// Fresh metadata for a new file.
    pub fn new(author: impl Into<String>, wire: WireFormat) -> Self {
        let now = Utc::now();
        Self {
            file_id: Uuid::new_v4(),
            author: author.into(),
            created_at: now,
            modified_at: now,
            wire,
            content_index: BTreeMap::new(),
        }
    }

    /// Record (or replace) a content hash entry and bump `modified_at`.
    pub fn record_content(&mut self, name: impl Into<String>, hash: ContentHash) {
        self.content_index.insert(name.into(), hash);
        self.modified_at = Utc::now();
    }

    /// Drop a content hash entry. Returns `true` if it existed.
    pub fn remove_content(&mut self, name: &str) -> bool {
        let removed = self.content_index.remove(name).is_some();
        if removed {
            self.modified_at = Utc::now();
        }
        removed
    }

    /// Look up the recorded hash for a content name.
    pub fn hash_for(&self, name: &str) -> Option<&ContentHash> {
        self.content_index.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_metadata_has_identity_and_timestamps() {
        let meta = FileMetadata::new("John Doe", WireFormat::Json);
        assert_eq!(meta.author, "John Doe");
        assert_eq!(meta.created_at, meta.modified_at);
        assert!(meta.content_index.is_empty());
    }

    #[test]
    fn record_and_lookup() {
        let mut meta = FileMetadata::new("author", WireFormat::Json);
        let hash = ContentHash::from_bytes(b"payload");
        meta.record_content("greeting", hash);
        assert_eq!(meta.hash_for("greeting"), Some(&hash));
        assert!(meta.hash_for("missing").is_none());
    }

    #[test]
    fn record_bumps_modified() {
        let mut meta = FileMetadata::new("author", WireFormat::Json);
        let created = meta.created_at;
        meta.record_content("x", ContentHash::from_bytes(b"x"));
        assert!(meta.modified_at >= created);
    }

    #[test]
    fn remove_reports_existence() {
        let mut meta = FileMetadata::new("author", WireFormat::Json);
        meta.record_content("x", ContentHash::from_bytes(b"x"));
        assert!(meta.remove_content("x"));
        assert!(!meta.remove_content("x"));
    }

    #[test]
    fn serde_roundtrip() {
        let mut meta = FileMetadata::new("author", WireFormat::Binary);
        meta.record_content("blob", ContentHash::from_bytes(b"blob"));
        let json = serde_json::to_string(&meta).unwrap();
        let parsed: FileMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(meta, parsed);
    }
}
