//! File codec for the Cask container format.
//!
//! Serializes a file model's components into one length-prefixed byte
//! stream with a trailing whole-file digest, and parses that stream back
//! with full verification.
//!
//! # On-disk layout
//!
//! ```text
//! [varint len][header bytes]
//! [varint len][metadata bytes]
//! [varint len][content bytes]
//! [32 raw bytes]                -- whole-stream BLAKE3 digest, unframed
//! ```
//!
//! Component order is part of the format contract. The digest is computed
//! over the framed component stream and checked before anything is
//! deserialized; the header's magic signature is checked independently.

pub mod error;
pub mod frame;
pub mod reader;
pub mod wire;
pub mod writer;

pub use error::{CodecError, CodecResult};
pub use reader::FileReader;
pub use writer::FileWriter;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use cask_container::{Pipeline, WireFormat, XChaChaEncryptor};
    use cask_model::{FileBuilder, FileModel};
    use cask_store::{InMemoryStorage, LocalStorage, Storage};

    const DIGEST_SIZE: usize = 32;

    fn sample_model(wire: WireFormat) -> FileModel {
        FileBuilder::new("John Doe", wire)
            .add_text("greeting", "Hello, world!", false)
            .add_bytes("blob", vec![0xABu8; 20_000], true)
            .declare_version("v1.0", "/tmp/versions")
            .build()
            .unwrap()
    }

    fn write_to_memory(model: &FileModel) -> (Arc<InMemoryStorage>, Vec<u8>) {
        let storage = Arc::new(InMemoryStorage::new());
        let writer = FileWriter::new(storage.clone());
        let path = Path::new("/file.dbf");
        writer.write(model, path).unwrap();
        let bytes = storage.read_stream(path).unwrap();
        (storage, bytes)
    }

    #[test]
    fn roundtrip_json() {
        let model = sample_model(WireFormat::Json);
        let (storage, _) = write_to_memory(&model);

        let reader = FileReader::new(storage);
        let decoded = reader.read(Path::new("/file.dbf")).unwrap();

        assert_eq!(decoded, model);
        assert_eq!(
            decoded
                .content_by_name("greeting")
                .unwrap()
                .get_text()
                .unwrap(),
            "Hello, world!"
        );
        assert_eq!(decoded.current_version().unwrap().label(), "v1.0");
    }

    #[test]
    fn roundtrip_binary() {
        let model = sample_model(WireFormat::Binary);
        let (storage, _) = write_to_memory(&model);

        let decoded = FileReader::new(storage).read(Path::new("/file.dbf")).unwrap();
        assert_eq!(decoded, model);
        assert_eq!(
            decoded.content_by_name("blob").unwrap().get_bytes().unwrap(),
            vec![0xABu8; 20_000]
        );
    }

    #[test]
    fn reader_detects_format_regardless_of_configured_wire() {
        // A binary file read by a json-configured reader still decodes:
        // the header probe falls through to the other format.
        let model = sample_model(WireFormat::Binary);
        let (storage, _) = write_to_memory(&model);

        let reader =
            FileReader::new(storage).with_pipeline(Pipeline::standard(WireFormat::Json));
        let decoded = reader.read(Path::new("/file.dbf")).unwrap();
        assert_eq!(decoded.metadata().wire, WireFormat::Binary);
    }

    #[test]
    fn single_byte_flip_in_content_region_fails_integrity() {
        let model = sample_model(WireFormat::Json);
        let (_, mut bytes) = write_to_memory(&model);

        // Inside the content component (last byte before the digest).
        let idx = bytes.len() - DIGEST_SIZE - 1;
        bytes[idx] ^= 0x01;

        let storage = Arc::new(InMemoryStorage::new());
        storage.write_stream(Path::new("/tampered.dbf"), &bytes).unwrap();
        let err = FileReader::new(storage)
            .read(Path::new("/tampered.dbf"))
            .unwrap_err();
        assert!(matches!(err, CodecError::Integrity { .. }));
    }

    #[test]
    fn altered_magic_with_recomputed_digest_fails_format_check() {
        use cask_crypto::ContentHasher;
        use crate::frame::{decode_varint, encode_varint};

        let model = sample_model(WireFormat::Json);
        let (_, bytes) = write_to_memory(&model);

        // Re-frame with a forged header: the digest is recomputed so only
        // the independent signature check can catch it.
        let body = &bytes[..bytes.len() - DIGEST_SIZE];
        let mut components: Vec<Vec<u8>> = Vec::new();
        let mut pos = 0usize;
        while pos < body.len() {
            let (len, consumed) = decode_varint(&body[pos..]).unwrap();
            pos += consumed;
            components.push(body[pos..pos + len as usize].to_vec());
            pos += len as usize;
        }

        let mut header: serde_json::Value = serde_json::from_slice(&components[0]).unwrap();
        header["signature"][0] = serde_json::json!(b'X');
        components[0] = serde_json::to_vec(&header).unwrap();

        let mut forged = Vec::new();
        for component in &components {
            encode_varint(&mut forged, component.len() as u64);
            forged.extend_from_slice(component);
        }
        let digest = ContentHasher::FILE.hash(&forged);
        forged.extend_from_slice(digest.as_bytes());

        let storage = Arc::new(InMemoryStorage::new());
        storage.write_stream(Path::new("/forged.dbf"), &forged).unwrap();
        let err = FileReader::new(storage)
            .read(Path::new("/forged.dbf"))
            .unwrap_err();
        assert!(matches!(err, CodecError::FormatMismatch { .. }));
    }

    #[test]
    fn truncated_file_is_corrupt() {
        let model = sample_model(WireFormat::Json);
        let (_, bytes) = write_to_memory(&model);

        let storage = Arc::new(InMemoryStorage::new());
        storage
            .write_stream(Path::new("/short.dbf"), &bytes[..DIGEST_SIZE / 2])
            .unwrap();
        let err = FileReader::new(storage)
            .read(Path::new("/short.dbf"))
            .unwrap_err();
        assert!(matches!(err, CodecError::CorruptFile { .. }));
    }

    #[test]
    fn unset_container_never_serializes() {
        use cask_container::ContentContainer;
        use cask_model::FileMetadata;

        let model = FileModel::new(FileMetadata::new("author", WireFormat::Json));
        // Bypass add_content's guard by reassembling from parts.
        let unset = ContentContainer::new("empty", Pipeline::default(), false);
        let model = FileModel::from_parts(
            *model.header(),
            model.metadata().clone(),
            vec![unset],
            vec![],
            None,
        );

        let writer = FileWriter::new(Arc::new(InMemoryStorage::new()));
        let err = writer.encode(&model).unwrap_err();
        assert!(matches!(err, CodecError::Model(_)));
    }

    #[test]
    fn encrypted_file_roundtrip() {
        let encryptor = Arc::new(XChaChaEncryptor::new([42u8; 32]));
        let model = FileBuilder::new("author", WireFormat::Json)
            .with_encryptor(encryptor.clone())
            .add_text("secret", "classified payload", true)
            .build()
            .unwrap();

        let (storage, _) = write_to_memory(&model);
        let reader = FileReader::new(storage).with_pipeline(
            Pipeline::standard(WireFormat::Json).with_encryptor(encryptor),
        );
        let decoded = reader.read(Path::new("/file.dbf")).unwrap();
        assert_eq!(
            decoded.content_by_name("secret").unwrap().get_text().unwrap(),
            "classified payload"
        );
    }

    #[test]
    fn disk_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disk.dbf");
        let storage = Arc::new(LocalStorage::new());

        let model = sample_model(WireFormat::Json);
        FileWriter::new(storage.clone()).write(&model, &path).unwrap();
        let decoded = FileReader::new(storage).read(&path).unwrap();
        assert_eq!(decoded, model);
    }

    #[test]
    fn hashes_survive_roundtrip() {
        let model = sample_model(WireFormat::Json);
        let (storage, _) = write_to_memory(&model);
        let decoded = FileReader::new(storage).read(Path::new("/file.dbf")).unwrap();
        assert!(decoded.verify_content_hashes());
    }
}
