use std::io::Read;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use cask_crypto::ContentHasher;
use cask_types::{ContainerFlag, ContainerFlags, ContentHash, TypeDescriptor};

use crate::error::{ContainerError, ContainerResult};
use crate::pipeline::Pipeline;
use crate::pool::BufferPool;

/// A named, typed, hashed unit of payload data within a Cask file.
///
/// The stored bytes are the output of the processing pipeline (serialize →
/// compress → encrypt), and `hash` always covers exactly those bytes — never
/// a stale value. A container is populated once; afterwards the only
/// permitted mutation is [`recompress`](Self::recompress), which re-derives
/// the hash.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentContainer {
    name: String,
    descriptor: TypeDescriptor,
    data: Vec<u8>,
    hash: ContentHash,
    flags: ContainerFlags,
    compress_requested: bool,
    #[serde(skip, default)]
    pipeline: Pipeline,
}

impl ContentContainer {
    /// Create an empty container. Populate it with exactly one `set_*` call.
    pub fn new(name: impl Into<String>, pipeline: Pipeline, compress: bool) -> Self {
        Self {
            name: name.into(),
            descriptor: TypeDescriptor::bytes(),
            data: Vec::new(),
            hash: ContentHash::null(),
            flags: ContainerFlags::empty(),
            compress_requested: compress,
            pipeline,
        }
    }

    // ---- set path -------------------------------------------------------

    /// Store a raw byte payload.
    pub fn set_bytes(&mut self, data: &[u8]) -> ContainerResult<()> {
        if data.is_empty() {
            return Err(ContainerError::EmptyPayload);
        }
        self.store(data.to_vec(), TypeDescriptor::bytes())
    }

    /// Store a UTF-8 text payload.
    pub fn set_text(&mut self, text: &str) -> ContainerResult<()> {
        if text.is_empty() {
            return Err(ContainerError::EmptyPayload);
        }
        self.store(text.as_bytes().to_vec(), TypeDescriptor::text())
    }

    /// Serialize a structured value with the pipeline's wire format and
    /// store the result.
    pub fn set_object<T: Serialize>(&mut self, value: &T) -> ContainerResult<()> {
        let bytes = self.pipeline.wire.serialize(value)?;
        let (module_path, type_name) = split_type_name(std::any::type_name::<T>());
        self.set_object_bytes(bytes, type_name, module_path)
    }

    /// Store an already-serialized object payload with its type identity.
    pub fn set_object_bytes(
        &mut self,
        bytes: Vec<u8>,
        type_name: impl Into<String>,
        module_path: impl Into<String>,
    ) -> ContainerResult<()> {
        if bytes.is_empty() {
            return Err(ContainerError::EmptyPayload);
        }
        self.store(bytes, TypeDescriptor::object(type_name, module_path))
    }

    /// Drain a byte stream through a pooled buffer and store the result.
    pub fn set_stream<R: Read>(&mut self, mut reader: R, pool: &BufferPool) -> ContainerResult<()> {
        let mut data = Vec::new();
        let mut chunk = pool.acquire();
        loop {
            let n = reader.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            data.extend_from_slice(&chunk[..n]);
        }
        if data.is_empty() {
            return Err(ContainerError::EmptyPayload);
        }
        self.store(data, TypeDescriptor::stream())
    }

    fn store(&mut self, payload: Vec<u8>, descriptor: TypeDescriptor) -> ContainerResult<()> {
        if self.flags.contains(ContainerFlag::DataIsSet) {
            return Err(ContainerError::DataAlreadySet(self.name.clone()));
        }
        let mut bytes = payload;
        if self.compress_requested {
            let compressor = self
                .pipeline
                .compressor
                .as_ref()
                .ok_or_else(|| ContainerError::Compression("no compressor configured".into()))?;
            bytes = compressor.compress(&bytes)?;
            self.flags.insert(ContainerFlag::Compressed);
        }
        if let Some(encryptor) = &self.pipeline.encryptor {
            bytes = encryptor.encrypt(&bytes)?;
            self.flags.insert(ContainerFlag::Encrypted);
        }
        self.hash = ContentHasher::CONTENT.hash(&bytes);
        self.data = bytes;
        self.descriptor = descriptor;
        self.flags.insert(ContainerFlag::DataIsSet);
        Ok(())
    }

    // ---- get path -------------------------------------------------------

    /// The stored bytes, verbatim (post-pipeline).
    pub fn get_raw_data(&self) -> ContainerResult<&[u8]> {
        if !self.is_set() {
            return Err(ContainerError::NoData(self.name.clone()));
        }
        Ok(&self.data)
    }

    /// Verify the hash, undo encryption and compression, and return the
    /// logical payload bytes.
    pub fn get_bytes(&self) -> ContainerResult<Vec<u8>> {
        let stored = self.get_raw_data()?;
        let computed = ContentHasher::CONTENT.hash(stored);
        if computed != self.hash {
            return Err(ContainerError::Integrity {
                expected: self.hash.to_hex(),
                computed: computed.to_hex(),
            });
        }
        let mut bytes = stored.to_vec();
        if self.flags.contains(ContainerFlag::Encrypted) {
            let encryptor = self
                .pipeline
                .encryptor
                .as_ref()
                .ok_or_else(|| ContainerError::Encryption("no encryptor configured".into()))?;
            bytes = encryptor.decrypt(&bytes)?;
        }
        if self.flags.contains(ContainerFlag::Compressed) {
            let compressor = self
                .pipeline
                .compressor
                .as_ref()
                .ok_or_else(|| ContainerError::Compression("no compressor configured".into()))?;
            bytes = compressor.decompress(&bytes)?;
        }
        Ok(bytes)
    }

    /// Decode the payload as UTF-8 text.
    pub fn get_text(&self) -> ContainerResult<String> {
        let bytes = self.get_bytes()?;
        String::from_utf8(bytes).map_err(|e| ContainerError::Deserialization(e.to_string()))
    }

    /// Decode the payload as a structured value via the wire format.
    pub fn get_object<T: DeserializeOwned>(&self) -> ContainerResult<T> {
        let bytes = self.get_bytes()?;
        self.pipeline.wire.deserialize(&bytes)
    }

    /// Best-effort hash re-check; never fails the container.
    pub fn verify_hash(&self) -> bool {
        self.is_set() && ContentHasher::CONTENT.verify(&self.data, &self.hash)
    }

    // ---- explicit recompression ----------------------------------------

    /// Re-run the compression stage with the pipeline's current compressor
    /// and re-derive the hash. The one permitted post-set mutation.
    pub fn recompress(&mut self) -> ContainerResult<()> {
        let plain = self.get_bytes()?;
        let compressor = self
            .pipeline
            .compressor
            .as_ref()
            .ok_or_else(|| ContainerError::Compression("no compressor configured".into()))?;
        let mut bytes = compressor.compress(&plain)?;
        if let Some(encryptor) = &self.pipeline.encryptor {
            bytes = encryptor.encrypt(&bytes)?;
        }
        self.flags.insert(ContainerFlag::Compressed);
        self.hash = ContentHasher::CONTENT.hash(&bytes);
        self.data = bytes;
        tracing::debug!(name = %self.name, len = self.data.len(), "recompressed container");
        Ok(())
    }

    // ---- accessors ------------------------------------------------------

    /// Whether the payload has been set.
    pub fn is_set(&self) -> bool {
        self.flags.contains(ContainerFlag::DataIsSet)
    }

    /// Container name (unique within a file).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The recorded type descriptor.
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// The content hash over the stored bytes.
    pub fn hash(&self) -> ContentHash {
        self.hash
    }

    /// The container state flags.
    pub fn flags(&self) -> ContainerFlags {
        self.flags
    }

    /// Size of the stored bytes.
    pub fn stored_len(&self) -> usize {
        self.data.len()
    }

    /// Re-attach a runtime pipeline after deserialization. The wire form
    /// carries no pipeline; readers attach the one matching the file.
    pub fn attach_pipeline(&mut self, pipeline: Pipeline) {
        self.pipeline = pipeline;
    }
}

/// Structural equality ignores the runtime pipeline.
impl PartialEq for ContentContainer {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.descriptor == other.descriptor
            && self.data == other.data
            && self.hash == other.hash
            && self.flags == other.flags
            && self.compress_requested == other.compress_requested
    }
}

impl Eq for ContentContainer {}

/// Split a `std::any::type_name` path into (module_path, type_name).
fn split_type_name(full: &str) -> (String, String) {
    match full.rsplit_once("::") {
        Some((module, name)) => (module.to_string(), name.to_string()),
        None => (String::new(), full.to_string()),
    }
}
