use std::path::Path;
use std::sync::Arc;

use cask_crypto::ContentHasher;
use cask_model::{FileModel, ModelError};
use cask_store::Storage;

use crate::error::{CodecError, CodecResult};
use crate::frame::encode_varint;
use crate::wire::MetadataBlock;

/// Serializes a [`FileModel`] into one framed byte stream and writes it.
///
/// Components are framed in the fixed order header → metadata → content;
/// a 32-byte whole-stream digest is appended unframed. The write is
/// create-or-truncate with no partial-write recovery.
pub struct FileWriter {
    storage: Arc<dyn Storage>,
}

impl FileWriter {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Encode and write the model to the target path.
    pub fn write(&self, model: &FileModel, path: &Path) -> CodecResult<()> {
        let bytes = self.encode(model)?;
        self.storage.write_stream(path, &bytes)?;
        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            contents = model.contents().len(),
            "wrote cask file"
        );
        Ok(())
    }

    /// Encode the model into the complete on-disk byte stream.
    pub fn encode(&self, model: &FileModel) -> CodecResult<Vec<u8>> {
        // A container without data, or one missing from the hash index,
        // must never reach serialization.
        for container in model.contents() {
            if !container.is_set() {
                return Err(ModelError::MissingData(container.name().to_string()).into());
            }
            if model.metadata().hash_for(container.name()) != Some(&container.hash()) {
                return Err(CodecError::Serialization(format!(
                    "content index out of sync for '{}'",
                    container.name()
                )));
            }
        }

        let wire = model.metadata().wire;
        let header_bytes = wire
            .serialize(model.header())
            .map_err(|e| CodecError::Serialization(e.to_string()))?;
        let block = MetadataBlock {
            metadata: model.metadata().clone(),
            versions: model.versions().to_vec(),
            current_version: model.current_version().cloned(),
        };
        let metadata_bytes = wire
            .serialize(&block)
            .map_err(|e| CodecError::Serialization(e.to_string()))?;
        let content_bytes = wire
            .serialize(&model.contents().to_vec())
            .map_err(|e| CodecError::Serialization(e.to_string()))?;

        let mut buf = Vec::new();
        for component in [&header_bytes, &metadata_bytes, &content_bytes] {
            encode_varint(&mut buf, component.len() as u64);
            buf.extend_from_slice(component);
        }

        let digest = ContentHasher::FILE.hash(&buf);
        buf.extend_from_slice(digest.as_bytes());
        Ok(buf)
    }
}
