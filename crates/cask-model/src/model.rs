use cask_container::{ContentContainer, Pipeline};

use crate::error::{ModelError, ModelResult};
use crate::header::FileHeader;
use crate::metadata::FileMetadata;
use crate::version::FileVersion;

/// The container-of-containers: one Cask file in memory.
///
/// Owns its containers and versions exclusively. Mutation is limited to the
/// append operations `add_content` and `add_version`; everything else is
/// constructed through the builder and read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct FileModel {
    header: FileHeader,
    metadata: FileMetadata,
    contents: Vec<ContentContainer>,
    versions: Vec<FileVersion>,
    current_version: Option<FileVersion>,
}

impl FileModel {
    /// A fresh model with the current header and the given metadata.
    pub fn new(metadata: FileMetadata) -> Self {
        Self {
            header: FileHeader::current(),
            metadata,
            contents: Vec::new(),
            versions: Vec::new(),
            current_version: None,
        }
    }

    /// Reassemble a model from deserialized parts (used by the file codec).
    pub fn from_parts(
        header: FileHeader,
        metadata: FileMetadata,
        contents: Vec<ContentContainer>,
        versions: Vec<FileVersion>,
        current_version: Option<FileVersion>,
    ) -> Self {
        Self {
            header,
            metadata,
            contents,
            versions,
            current_version,
        }
    }

    /// Append a populated container and record its hash in the metadata
    /// index.
    ///
    /// Rejects containers without data (they must never reach
    /// serialization) and duplicate names.
    pub fn add_content(&mut self, container: ContentContainer) -> ModelResult<()> {
        if !container.is_set() {
            return Err(ModelError::MissingData(container.name().to_string()));
        }
        if self.content_by_name(container.name()).is_some() {
            return Err(ModelError::DuplicateContent(container.name().to_string()));
        }
        self.metadata
            .record_content(container.name(), container.hash());
        self.contents.push(container);
        Ok(())
    }

    /// Append a version record; the latest-dated version becomes current.
    pub fn add_version(&mut self, version: FileVersion) {
        let supersedes = match &self.current_version {
            Some(current) => !current.is_newer_than(&version),
            None => true,
        };
        if supersedes {
            self.current_version = Some(version.clone());
        }
        self.versions.push(version);
    }

    /// Look up a container by name.
    pub fn content_by_name(&self, name: &str) -> Option<&ContentContainer> {
        self.contents.iter().find(|c| c.name() == name)
    }

    /// Best-effort re-check of every container hash against its stored
    /// bytes and the metadata index. Returns `false` on any divergence
    /// rather than failing.
    pub fn verify_content_hashes(&self) -> bool {
        self.contents.iter().all(|c| {
            c.verify_hash() && self.metadata.hash_for(c.name()) == Some(&c.hash())
        })
    }

    /// Re-attach a runtime pipeline to every container (after a read).
    pub fn attach_pipeline(&mut self, pipeline: &Pipeline) {
        for container in &mut self.contents {
            container.attach_pipeline(pipeline.clone());
        }
    }

    // ---- accessors ------------------------------------------------------

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    pub fn contents(&self) -> &[ContentContainer] {
        &self.contents
    }

    pub fn versions(&self) -> &[FileVersion] {
        &self.versions
    }

    pub fn current_version(&self) -> Option<&FileVersion> {
        self.current_version.as_ref()
    }
}
