use std::io::Read;

use serde::Serialize;

use cask_types::PayloadKind;

use crate::container::ContentContainer;
use crate::error::{ContainerError, ContainerResult};
use crate::pipeline::Pipeline;
use crate::pool::BufferPool;

/// A payload handed to the factory, tagged by shape.
pub enum Payload {
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// A byte stream drained at build time.
    Stream(Box<dyn Read + Send>),
    /// A structured value, pre-serialized with the pipeline's wire format.
    Object {
        type_name: String,
        module_path: String,
        bytes: Vec<u8>,
    },
}

impl Payload {
    /// The shape tag used for strategy dispatch.
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Text(_) => PayloadKind::Text,
            Self::Bytes(_) => PayloadKind::Bytes,
            Self::Stream(_) => PayloadKind::Stream,
            Self::Object { .. } => PayloadKind::Object,
        }
    }
}

impl std::fmt::Debug for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Payload::{}", self.kind())
    }
}

/// A name/payload/compress-flag build request.
#[derive(Debug)]
pub struct BuildRequest {
    pub name: String,
    pub payload: Payload,
    pub compress: bool,
}

/// One construction strategy per payload kind.
///
/// Strategies are stateless and thread-safe; they produce a fully populated
/// container synchronously.
pub trait ContainerStrategy: Send + Sync {
    /// Whether this strategy handles the given payload kind.
    fn claims(&self, kind: PayloadKind) -> bool;

    /// Build a populated container from the request.
    fn build(
        &self,
        request: BuildRequest,
        pipeline: &Pipeline,
        pool: &BufferPool,
    ) -> ContainerResult<ContentContainer>;
}

struct TextStrategy;

impl ContainerStrategy for TextStrategy {
    fn claims(&self, kind: PayloadKind) -> bool {
        kind == PayloadKind::Text
    }

    fn build(
        &self,
        request: BuildRequest,
        pipeline: &Pipeline,
        _pool: &BufferPool,
    ) -> ContainerResult<ContentContainer> {
        let Payload::Text(text) = request.payload else {
            return Err(ContainerError::UnsupportedType("expected text payload".into()));
        };
        let mut container =
            ContentContainer::new(request.name, pipeline.clone(), request.compress);
        container.set_text(&text)?;
        Ok(container)
    }
}

struct BytesStrategy;

impl ContainerStrategy for BytesStrategy {
    fn claims(&self, kind: PayloadKind) -> bool {
        kind == PayloadKind::Bytes
    }

    fn build(
        &self,
        request: BuildRequest,
        pipeline: &Pipeline,
        _pool: &BufferPool,
    ) -> ContainerResult<ContentContainer> {
        let Payload::Bytes(bytes) = request.payload else {
            return Err(ContainerError::UnsupportedType("expected byte payload".into()));
        };
        let mut container =
            ContentContainer::new(request.name, pipeline.clone(), request.compress);
        container.set_bytes(&bytes)?;
        Ok(container)
    }
}

struct StreamStrategy;

impl ContainerStrategy for StreamStrategy {
    fn claims(&self, kind: PayloadKind) -> bool {
        kind == PayloadKind::Stream
    }

    fn build(
        &self,
        request: BuildRequest,
        pipeline: &Pipeline,
        pool: &BufferPool,
    ) -> ContainerResult<ContentContainer> {
        let Payload::Stream(reader) = request.payload else {
            return Err(ContainerError::UnsupportedType("expected stream payload".into()));
        };
        let mut container =
            ContentContainer::new(request.name, pipeline.clone(), request.compress);
        container.set_stream(reader, pool)?;
        Ok(container)
    }
}

struct ObjectStrategy;

impl ContainerStrategy for ObjectStrategy {
    fn claims(&self, kind: PayloadKind) -> bool {
        kind == PayloadKind::Object
    }

    fn build(
        &self,
        request: BuildRequest,
        pipeline: &Pipeline,
        _pool: &BufferPool,
    ) -> ContainerResult<ContentContainer> {
        let Payload::Object {
            type_name,
            module_path,
            bytes,
        } = request.payload
        else {
            return Err(ContainerError::UnsupportedType("expected object payload".into()));
        };
        let mut container =
            ContentContainer::new(request.name, pipeline.clone(), request.compress);
        container.set_object_bytes(bytes, type_name, module_path)?;
        Ok(container)
    }
}

/// Polymorphic container construction.
///
/// Dispatches a [`BuildRequest`] to the first strategy claiming its payload
/// kind; exactly one registered strategy claims each kind.
pub struct ContainerFactory {
    pipeline: Pipeline,
    pool: BufferPool,
    strategies: Vec<Box<dyn ContainerStrategy>>,
}

impl ContainerFactory {
    /// Factory with the standard strategy set (text, bytes, stream, object).
    pub fn new(pipeline: Pipeline, pool: BufferPool) -> Self {
        Self {
            pipeline,
            pool,
            strategies: vec![
                Box::new(TextStrategy),
                Box::new(BytesStrategy),
                Box::new(StreamStrategy),
                Box::new(ObjectStrategy),
            ],
        }
    }

    /// Factory with a caller-supplied strategy set.
    pub fn with_strategies(
        pipeline: Pipeline,
        pool: BufferPool,
        strategies: Vec<Box<dyn ContainerStrategy>>,
    ) -> Self {
        Self {
            pipeline,
            pool,
            strategies,
        }
    }

    /// The factory's pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Dispatch a build request to the claiming strategy.
    pub fn build(&self, request: BuildRequest) -> ContainerResult<ContentContainer> {
        let kind = request.payload.kind();
        let strategy = self
            .strategies
            .iter()
            .find(|s| s.claims(kind))
            .ok_or(ContainerError::StrategyNotFound(kind))?;
        strategy.build(request, &self.pipeline, &self.pool)
    }

    /// Build a container from UTF-8 text.
    pub fn from_text(
        &self,
        name: impl Into<String>,
        text: impl Into<String>,
        compress: bool,
    ) -> ContainerResult<ContentContainer> {
        self.build(BuildRequest {
            name: name.into(),
            payload: Payload::Text(text.into()),
            compress,
        })
    }

    /// Build a container from raw bytes.
    pub fn from_bytes(
        &self,
        name: impl Into<String>,
        data: Vec<u8>,
        compress: bool,
    ) -> ContainerResult<ContentContainer> {
        self.build(BuildRequest {
            name: name.into(),
            payload: Payload::Bytes(data),
            compress,
        })
    }

    /// Build a container by draining a byte stream.
    pub fn from_stream(
        &self,
        name: impl Into<String>,
        reader: Box<dyn Read + Send>,
        compress: bool,
    ) -> ContainerResult<ContentContainer> {
        self.build(BuildRequest {
            name: name.into(),
            payload: Payload::Stream(reader),
            compress,
        })
    }

    /// Serialize a structured value with the pipeline's wire format and
    /// build a container from the result.
    pub fn from_object<T: Serialize>(
        &self,
        name: impl Into<String>,
        value: &T,
        compress: bool,
    ) -> ContainerResult<ContentContainer> {
        let bytes = self.pipeline.wire.serialize(value)?;
        let full = std::any::type_name::<T>();
        let (module_path, type_name) = match full.rsplit_once("::") {
            Some((module, tail)) => (module.to_string(), tail.to_string()),
            None => (String::new(), full.to_string()),
        };
        self.build(BuildRequest {
            name: name.into(),
            payload: Payload::Object {
                type_name,
                module_path,
                bytes,
            },
            compress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::pipeline::WireFormat;
    use serde::Deserialize;

    fn factory() -> ContainerFactory {
        ContainerFactory::new(Pipeline::standard(WireFormat::Json), BufferPool::default())
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Settings {
        retries: u8,
    }

    #[test]
    fn text_dispatch() {
        let container = factory().from_text("note", "hello", false).unwrap();
        assert_eq!(container.descriptor().kind, PayloadKind::Text);
        assert_eq!(container.get_text().unwrap(), "hello");
    }

    #[test]
    fn bytes_dispatch() {
        let container = factory()
            .from_bytes("blob", vec![1, 2, 3], false)
            .unwrap();
        assert_eq!(container.descriptor().kind, PayloadKind::Bytes);
        assert_eq!(container.get_bytes().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn stream_dispatch() {
        let container = factory()
            .from_stream("stream", Box::new(Cursor::new(b"streamed".to_vec())), false)
            .unwrap();
        assert_eq!(container.descriptor().kind, PayloadKind::Stream);
        assert_eq!(container.get_bytes().unwrap(), b"streamed");
    }

    #[test]
    fn object_dispatch() {
        let settings = Settings { retries: 3 };
        let container = factory().from_object("settings", &settings, false).unwrap();
        assert_eq!(container.descriptor().kind, PayloadKind::Object);
        assert_eq!(container.descriptor().type_name, "Settings");
        let decoded: Settings = container.get_object().unwrap();
        assert_eq!(decoded, settings);
    }

    #[test]
    fn compressed_build() {
        let container = factory()
            .from_bytes("blob", vec![0u8; 50_000], true)
            .unwrap();
        assert!(container.stored_len() < 50_000);
        assert_eq!(container.get_bytes().unwrap(), vec![0u8; 50_000]);
    }

    #[test]
    fn no_strategy_for_kind_fails() {
        let factory = ContainerFactory::with_strategies(
            Pipeline::standard(WireFormat::Json),
            BufferPool::default(),
            vec![],
        );
        let err = factory.from_text("note", "hello", false).unwrap_err();
        assert!(matches!(
            err,
            ContainerError::StrategyNotFound(PayloadKind::Text)
        ));
    }

    #[test]
    fn empty_payload_propagates() {
        let err = factory().from_bytes("blob", vec![], false).unwrap_err();
        assert!(matches!(err, ContainerError::EmptyPayload));
    }
}
