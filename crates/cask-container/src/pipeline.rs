use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::compress::{Compressor, ZstdCompressor};
use crate::encrypt::Encryptor;
use crate::error::{ContainerError, ContainerResult};

/// Wire serialization format, chosen once per file and recorded in its
/// metadata so reads use the matching codec.
///
/// The two formats are functionally interchangeable: JSON for debuggability,
/// binary (bincode) for compactness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireFormat {
    #[default]
    Json,
    Binary,
}

impl WireFormat {
    /// Serialize a value with this format.
    pub fn serialize<T: Serialize>(&self, value: &T) -> ContainerResult<Vec<u8>> {
        match self {
            Self::Json => {
                serde_json::to_vec(value).map_err(|e| ContainerError::Serialization(e.to_string()))
            }
            Self::Binary => {
                bincode::serialize(value).map_err(|e| ContainerError::Serialization(e.to_string()))
            }
        }
    }

    /// Deserialize a value with this format.
    pub fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> ContainerResult<T> {
        match self {
            Self::Json => serde_json::from_slice(data)
                .map_err(|e| ContainerError::Deserialization(e.to_string())),
            Self::Binary => bincode::deserialize(data)
                .map_err(|e| ContainerError::Deserialization(e.to_string())),
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Binary => write!(f, "binary"),
        }
    }
}

/// The processing pipeline attached to a container.
///
/// Holds the wire format plus the optional compression and encryption
/// stages. Cloning is cheap; the stages are shared behind `Arc`.
#[derive(Clone)]
pub struct Pipeline {
    /// Serialization format for object payloads and file components.
    pub wire: WireFormat,
    /// Compression stage, applied when a container opts into compression.
    pub compressor: Option<Arc<dyn Compressor>>,
    /// Encryption stage, applied to every payload when present.
    pub encryptor: Option<Arc<dyn Encryptor>>,
}

impl Pipeline {
    /// Pipeline with the given wire format, zstd compression available,
    /// and no encryption.
    pub fn standard(wire: WireFormat) -> Self {
        Self {
            wire,
            compressor: Some(Arc::new(ZstdCompressor::default())),
            encryptor: None,
        }
    }

    /// Replace the encryption stage.
    pub fn with_encryptor(mut self, encryptor: Arc<dyn Encryptor>) -> Self {
        self.encryptor = Some(encryptor);
        self
    }

    /// Replace the compression stage.
    pub fn with_compressor(mut self, compressor: Arc<dyn Compressor>) -> Self {
        self.compressor = Some(compressor);
        self
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard(WireFormat::default())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("wire", &self.wire)
            .field("compressor", &self.compressor.is_some())
            .field("encryptor", &self.encryptor.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        value: u32,
    }

    #[test]
    fn json_roundtrip() {
        let sample = Sample {
            name: "test".into(),
            value: 42,
        };
        let bytes = WireFormat::Json.serialize(&sample).unwrap();
        let decoded: Sample = WireFormat::Json.deserialize(&bytes).unwrap();
        assert_eq!(sample, decoded);
    }

    #[test]
    fn binary_roundtrip() {
        let sample = Sample {
            name: "test".into(),
            value: 42,
        };
        let bytes = WireFormat::Binary.serialize(&sample).unwrap();
        let decoded: Sample = WireFormat::Binary.deserialize(&bytes).unwrap();
        assert_eq!(sample, decoded);
    }

    #[test]
    fn binary_is_more_compact_than_json() {
        let sample = Sample {
            name: "a-reasonably-long-name".into(),
            value: 7,
        };
        let json = WireFormat::Json.serialize(&sample).unwrap();
        let binary = WireFormat::Binary.serialize(&sample).unwrap();
        assert!(binary.len() < json.len());
    }

    #[test]
    fn deserialize_garbage_fails() {
        let err = WireFormat::Json
            .deserialize::<Sample>(b"not json at all")
            .unwrap_err();
        assert!(matches!(err, ContainerError::Deserialization(_)));
    }

    #[test]
    fn default_pipeline_has_compressor_no_encryptor() {
        let pipeline = Pipeline::default();
        assert_eq!(pipeline.wire, WireFormat::Json);
        assert!(pipeline.compressor.is_some());
        assert!(pipeline.encryptor.is_none());
    }
}
