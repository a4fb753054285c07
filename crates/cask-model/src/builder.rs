use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use cask_container::{
    BufferPool, BuildRequest, ContainerFactory, Encryptor, Payload, Pipeline, WireFormat,
};

use crate::error::{ModelError, ModelResult};
use crate::metadata::FileMetadata;
use crate::model::FileModel;
use crate::version::FileVersion;

/// Validated construction of a [`FileModel`].
///
/// The wire format is fixed at creation so object payloads added later are
/// serialized consistently. Containers are built when `build` runs, so a
/// request that would produce an empty or duplicate container fails the
/// whole build rather than leaving a half-assembled model.
pub struct FileBuilder {
    author: String,
    pipeline: Pipeline,
    pool: BufferPool,
    requests: Vec<BuildRequest>,
    versions: Vec<(String, PathBuf)>,
}

impl FileBuilder {
    /// Start a builder for the given author and wire format.
    pub fn new(author: impl Into<String>, wire: WireFormat) -> Self {
        Self {
            author: author.into(),
            pipeline: Pipeline::standard(wire),
            pool: BufferPool::default(),
            requests: Vec::new(),
            versions: Vec::new(),
        }
    }

    /// Attach an encryption stage to every container built here.
    pub fn with_encryptor(mut self, encryptor: Arc<dyn Encryptor>) -> Self {
        self.pipeline = self.pipeline.with_encryptor(encryptor);
        self
    }

    /// Use a shared buffer pool instead of a private one.
    pub fn with_pool(mut self, pool: BufferPool) -> Self {
        self.pool = pool;
        self
    }

    /// Queue a UTF-8 text container.
    pub fn add_text(
        mut self,
        name: impl Into<String>,
        text: impl Into<String>,
        compress: bool,
    ) -> Self {
        self.requests.push(BuildRequest {
            name: name.into(),
            payload: Payload::Text(text.into()),
            compress,
        });
        self
    }

    /// Queue a raw byte container.
    pub fn add_bytes(mut self, name: impl Into<String>, data: Vec<u8>, compress: bool) -> Self {
        self.requests.push(BuildRequest {
            name: name.into(),
            payload: Payload::Bytes(data),
            compress,
        });
        self
    }

    /// Queue a container drained from a byte stream.
    pub fn add_stream(
        mut self,
        name: impl Into<String>,
        reader: Box<dyn Read + Send>,
        compress: bool,
    ) -> Self {
        self.requests.push(BuildRequest {
            name: name.into(),
            payload: Payload::Stream(reader),
            compress,
        });
        self
    }

    /// Serialize a structured value with the builder's wire format and
    /// queue the result.
    pub fn add_object<T: Serialize>(
        mut self,
        name: impl Into<String>,
        value: &T,
        compress: bool,
    ) -> ModelResult<Self> {
        let bytes = self.pipeline.wire.serialize(value).map_err(ModelError::Container)?;
        let full = std::any::type_name::<T>();
        let (module_path, type_name) = match full.rsplit_once("::") {
            Some((module, tail)) => (module.to_string(), tail.to_string()),
            None => (String::new(), full.to_string()),
        };
        self.requests.push(BuildRequest {
            name: name.into(),
            payload: Payload::Object {
                type_name,
                module_path,
                bytes,
            },
            compress,
        });
        Ok(self)
    }

    /// Declare a version; the latest-dated declaration becomes current.
    pub fn declare_version(
        mut self,
        label: impl Into<String>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        self.versions.push((label.into(), base_dir.into()));
        self
    }

    /// Build the model: validate the author, construct every queued
    /// container, and declare every queued version.
    pub fn build(self) -> ModelResult<FileModel> {
        if self.author.trim().is_empty() {
            return Err(ModelError::Validation("author is empty".into()));
        }
        let metadata = FileMetadata::new(self.author, self.pipeline.wire);
        let mut model = FileModel::new(metadata);

        let factory = ContainerFactory::new(self.pipeline, self.pool);
        for request in self.requests {
            if request.name.trim().is_empty() {
                return Err(ModelError::Validation("content name is empty".into()));
            }
            let container = factory.build(request)?;
            model.add_content(container)?;
        }
        for (label, base_dir) in self.versions {
            model.add_version(FileVersion::new(label, base_dir)?);
        }
        Ok(model)
    }
}
