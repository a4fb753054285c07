use std::path::Path;
use std::sync::Arc;

use cask_container::{ContentContainer, Pipeline, WireFormat};
use cask_crypto::ContentHasher;
use cask_model::header::{CURRENT_VERSION, MAGIC};
use cask_model::{FileHeader, FileModel};
use cask_store::Storage;
use cask_types::ContentHash;

use crate::error::{CodecError, CodecResult};
use crate::frame::{decode_varint, encode_varint};
use crate::wire::MetadataBlock;

/// Size of the trailing whole-file digest.
const DIGEST_SIZE: usize = 32;

/// Parses a framed byte stream back into a verified [`FileModel`].
///
/// Verification order: walk the framed components, recompute the
/// whole-stream digest and compare it to the trailing block, check the
/// header signature and version, then deserialize the rest. Any parse
/// failure surfaces as a typed [`CodecError`], never a panic.
pub struct FileReader {
    storage: Arc<dyn Storage>,
    pipeline: Pipeline,
}

impl FileReader {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            pipeline: Pipeline::default(),
        }
    }

    /// Use a specific pipeline (compressor/encryptor stages) for the
    /// containers of files read here.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Read and verify the file at the path.
    pub fn read(&self, path: &Path) -> CodecResult<FileModel> {
        let data = self.storage.read_stream(path)?;
        let model = self.decode(&data)?;
        tracing::debug!(
            path = %path.display(),
            contents = model.contents().len(),
            "read cask file"
        );
        Ok(model)
    }

    /// Decode and verify a complete on-disk byte stream.
    pub fn decode(&self, data: &[u8]) -> CodecResult<FileModel> {
        if data.len() <= DIGEST_SIZE {
            return Err(CodecError::CorruptFile {
                offset: 0,
                reason: "file shorter than digest".into(),
            });
        }

        // Walk length-prefixed components until only the digest remains.
        let mut components: Vec<&[u8]> = Vec::new();
        let mut pos = 0usize;
        while data.len() - pos > DIGEST_SIZE {
            let (len, consumed) = decode_varint(&data[pos..]).map_err(|_| {
                CodecError::CorruptFile {
                    offset: pos,
                    reason: "bad component length prefix".into(),
                }
            })?;
            pos += consumed;
            let end = pos
                .checked_add(len as usize)
                .ok_or(CodecError::CorruptFile {
                    offset: pos,
                    reason: "component length overflow".into(),
                })?;
            if end > data.len() - DIGEST_SIZE {
                return Err(CodecError::CorruptFile {
                    offset: pos,
                    reason: "component extends into trailing digest".into(),
                });
            }
            components.push(&data[pos..end]);
            pos = end;
        }
        if data.len() - pos != DIGEST_SIZE {
            return Err(CodecError::CorruptFile {
                offset: pos,
                reason: "trailing digest truncated".into(),
            });
        }

        // Whole-file digest: the single authoritative corruption check.
        let mut reframed = Vec::with_capacity(pos);
        for component in &components {
            encode_varint(&mut reframed, component.len() as u64);
            reframed.extend_from_slice(component);
        }
        let computed = ContentHasher::FILE.hash(&reframed);
        let expected = ContentHash::from_digest(
            data[pos..].try_into().expect("digest slice is 32 bytes"),
        );
        if computed != expected {
            return Err(CodecError::Integrity {
                expected: expected.to_hex(),
                computed: computed.to_hex(),
            });
        }

        if components.len() != 3 {
            return Err(CodecError::CorruptFile {
                offset: 0,
                reason: format!("expected 3 components, found {}", components.len()),
            });
        }

        // Header signature check, independent of the digest check.
        let (wire, header) = self.probe_header(components[0])?;
        if header.version().major != CURRENT_VERSION.major {
            return Err(CodecError::UnsupportedVersion(header.version()));
        }

        let block: MetadataBlock = wire
            .deserialize(components[1])
            .map_err(|e| CodecError::Deserialization(e.to_string()))?;
        let contents: Vec<ContentContainer> = wire
            .deserialize(components[2])
            .map_err(|e| CodecError::Deserialization(e.to_string()))?;

        let mut model = FileModel::from_parts(
            header,
            block.metadata,
            contents,
            block.versions,
            block.current_version,
        );
        let mut pipeline = self.pipeline.clone();
        pipeline.wire = model.metadata().wire;
        model.attach_pipeline(&pipeline);
        Ok(model)
    }

    /// Detect the wire format by parsing the header component, trying the
    /// configured format first. The magic signature authenticates the probe.
    fn probe_header(&self, bytes: &[u8]) -> CodecResult<(WireFormat, FileHeader)> {
        let order = match self.pipeline.wire {
            WireFormat::Json => [WireFormat::Json, WireFormat::Binary],
            WireFormat::Binary => [WireFormat::Binary, WireFormat::Json],
        };
        let mut foreign_signature: Option<[u8; 12]> = None;
        for wire in order {
            match wire.deserialize::<FileHeader>(bytes) {
                Ok(header) if header.signature_matches() => return Ok((wire, header)),
                Ok(header) => foreign_signature = Some(*header.signature()),
                Err(_) => continue,
            }
        }
        Err(CodecError::FormatMismatch {
            expected: hex::encode(MAGIC),
            actual: foreign_signature
                .map(hex::encode)
                .unwrap_or_else(|| "unparseable header".into()),
        })
    }
}
