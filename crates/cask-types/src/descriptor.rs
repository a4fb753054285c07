use serde::{Deserialize, Serialize};

/// The shape of a payload stored in a content container.
///
/// This is a closed set resolved at the call site; there is no open-ended
/// runtime type dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadKind {
    /// UTF-8 text, stored as its encoded bytes.
    Text,
    /// Raw byte payload.
    Bytes,
    /// Payload drained from a byte stream.
    Stream,
    /// Serialized structured value (wire-format encoded).
    Object,
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Bytes => write!(f, "bytes"),
            Self::Stream => write!(f, "stream"),
            Self::Object => write!(f, "object"),
        }
    }
}

/// Logical type information for a stored payload.
///
/// Carries enough to reconstruct the logical type on read without embedding
/// any executable code: the payload shape, a type name, and the module path
/// the type came from (empty for plain text/byte payloads).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// The payload shape.
    pub kind: PayloadKind,
    /// Type name of the logical payload (e.g. `String`, `Vec<u8>`, a struct name).
    pub type_name: String,
    /// Module path the type belongs to, if known.
    pub module_path: String,
}

impl TypeDescriptor {
    /// Descriptor for a UTF-8 text payload.
    pub fn text() -> Self {
        Self {
            kind: PayloadKind::Text,
            type_name: "String".into(),
            module_path: String::new(),
        }
    }

    /// Descriptor for a raw byte payload.
    pub fn bytes() -> Self {
        Self {
            kind: PayloadKind::Bytes,
            type_name: "Vec<u8>".into(),
            module_path: String::new(),
        }
    }

    /// Descriptor for a stream-sourced payload.
    pub fn stream() -> Self {
        Self {
            kind: PayloadKind::Stream,
            type_name: "Vec<u8>".into(),
            module_path: String::new(),
        }
    }

    /// Descriptor for a serialized structured value.
    pub fn object(type_name: impl Into<String>, module_path: impl Into<String>) -> Self {
        Self {
            kind: PayloadKind::Object,
            type_name: type_name.into(),
            module_path: module_path.into(),
        }
    }

    /// Fully-qualified identity string (`module::Type` or just `Type`).
    pub fn identity(&self) -> String {
        if self.module_path.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}::{}", self.module_path, self.type_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_descriptor() {
        let desc = TypeDescriptor::text();
        assert_eq!(desc.kind, PayloadKind::Text);
        assert_eq!(desc.identity(), "String");
    }

    #[test]
    fn object_descriptor_identity() {
        let desc = TypeDescriptor::object("Document", "myapp::models");
        assert_eq!(desc.kind, PayloadKind::Object);
        assert_eq!(desc.identity(), "myapp::models::Document");
    }

    #[test]
    fn payload_kind_display() {
        assert_eq!(format!("{}", PayloadKind::Text), "text");
        assert_eq!(format!("{}", PayloadKind::Bytes), "bytes");
        assert_eq!(format!("{}", PayloadKind::Stream), "stream");
        assert_eq!(format!("{}", PayloadKind::Object), "object");
    }

    #[test]
    fn serde_roundtrip() {
        let desc = TypeDescriptor::object("Config", "app");
        let json = serde_json::to_string(&desc).unwrap();
        let parsed: TypeDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(desc, parsed);
    }
}
