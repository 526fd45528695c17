// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field shapes and field-level annotations.
//!
//! A field's type is a closed variant: every search and emitter matches it
//! exhaustively, so adding a shape is compiler-enforced everywhere.
//!
//! ```text
//! FieldType
//! ├── Single(Kind)        - plain or explicit-presence value
//! ├── List(Kind)          - repeated value
//! └── Map(Scalar, Kind)   - map entry key and value
//!
//! Kind
//! ├── Scalar(Scalar)
//! ├── Enum(name)
//! └── Message(MessageRef)
//! ```

use std::fmt;

/// Protobuf scalar value kinds, collapsed onto the Rust types prost
/// generates for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// `bool`
    Bool,
    /// `int32`, `sint32`, `sfixed32`
    Int32,
    /// `int64`, `sint64`, `sfixed64`
    Int64,
    /// `uint32`, `fixed32`
    UInt32,
    /// `uint64`, `fixed64`
    UInt64,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `string`
    String,
    /// `bytes`
    Bytes
}

impl Scalar {
    /// Check if values of this kind can identify a resource.
    #[must_use]
    pub const fn is_id(self) -> bool {
        !matches!(self, Self::Bool | Self::Float | Self::Double | Self::Bytes)
    }

    /// Check if this is one of the integer widths.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int32 | Self::Int64 | Self::UInt32 | Self::UInt64
        )
    }

    /// Protobuf spelling used in diagnostics.
    #[must_use]
    pub const fn proto_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Bytes => "bytes"
        }
    }
}

/// Fully-qualified reference to a message, e.g. `acme.docs.v1.Document`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageRef(String);

impl MessageRef {
    /// Create a reference from a full name. A leading `.` is stripped.
    pub fn new(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        match full_name.strip_prefix('.') {
            Some(stripped) => Self(stripped.to_owned()),
            None => Self(full_name)
        }
    }

    /// Get the full name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageRef {
    fn from(full_name: &str) -> Self {
        Self::new(full_name)
    }
}

/// Kind of a single value: a scalar, an enum or a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Scalar value.
    Scalar(Scalar),

    /// Enum value, carried as `i32` by prost. Holds the enum full name.
    Enum(String),

    /// Nested message.
    Message(MessageRef)
}

impl Kind {
    /// Check if values of this kind can identify a resource.
    #[must_use]
    pub const fn is_id(&self) -> bool {
        match self {
            Self::Scalar(scalar) => scalar.is_id(),
            Self::Enum(_) => true,
            Self::Message(_) => false
        }
    }

    /// Get the referenced message, if any.
    #[must_use]
    pub const fn message(&self) -> Option<&MessageRef> {
        match self {
            Self::Message(message) => Some(message),
            Self::Scalar(_) | Self::Enum(_) => None
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => f.write_str(scalar.proto_name()),
            Self::Enum(name) => write!(f, "enum {name}"),
            Self::Message(message) => write!(f, "message {message}")
        }
    }
}

/// Shape of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// One value.
    Single(Kind),

    /// Repeated values, `Vec<T>`.
    List(Kind),

    /// Map entries, `HashMap<K, V>`.
    Map(Scalar, Kind)
}

impl FieldType {
    /// Kind of the value itself, of a list element or of a map value.
    #[must_use]
    pub const fn value_kind(&self) -> &Kind {
        match self {
            Self::Single(kind) | Self::List(kind) | Self::Map(_, kind) => kind
        }
    }

    /// Check if this is a list or a map.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(..))
    }

    /// Message reached by traversing this field, if any.
    #[must_use]
    pub const fn message_target(&self) -> Option<&MessageRef> {
        self.value_kind().message()
    }

    /// Message held by a singular field, if any.
    #[must_use]
    pub const fn single_message(&self) -> Option<&MessageRef> {
        match self {
            Self::Single(kind) => kind.message(),
            Self::List(_) | Self::Map(..) => None
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(kind) => write!(f, "{kind}"),
            Self::List(kind) => write!(f, "repeated {kind}"),
            Self::Map(key, value) => write!(f, "map<{}, {value}>", key.proto_name())
        }
    }
}

/// Access-control annotations of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldAnnotations {
    /// Field identifies the enclosing resource.
    pub resource_id: bool,

    /// Field holds the owning tenant of the enclosing resource.
    pub tenant_id: bool,

    /// Field is a named contextual attribute of the enclosing resource.
    pub attribute_name: Option<String>
}

/// One field of a message.
///
/// # Example
///
/// ```rust
/// use permit_codegen::schema::{FieldDef, FieldType, Kind, Scalar};
///
/// let id = FieldDef::scalar("id", Scalar::String).resource_id();
/// assert!(id.annotations.resource_id);
/// assert!(!id.presence);
///
/// let parent = FieldDef::message("parent", "acme.v1.Folder");
/// assert!(parent.presence);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDef {
    /// Field name as declared in the schema.
    pub name: String,

    /// Field shape.
    pub ty: FieldType,

    /// Declared with the proto3 `optional` keyword.
    pub optional: bool,

    /// The generated Rust field is an `Option`.
    pub presence: bool,

    /// Access-control annotations.
    pub annotations: FieldAnnotations
}

impl FieldDef {
    /// Create a field. Singular message fields always track presence.
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        let presence = ty.single_message().is_some();
        Self {
            name: name.into(),
            ty,
            optional: false,
            presence,
            annotations: FieldAnnotations::default()
        }
    }

    /// Singular scalar field.
    pub fn scalar(name: impl Into<String>, scalar: Scalar) -> Self {
        Self::new(name, FieldType::Single(Kind::Scalar(scalar)))
    }

    /// Singular enum field.
    pub fn enumeration(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Single(Kind::Enum(full_name.into())))
    }

    /// Singular message field.
    pub fn message(name: impl Into<String>, full_name: &str) -> Self {
        Self::new(name, FieldType::Single(Kind::Message(full_name.into())))
    }

    /// Repeated field.
    pub fn list(name: impl Into<String>, kind: Kind) -> Self {
        Self::new(name, FieldType::List(kind))
    }

    /// Map field.
    pub fn map(name: impl Into<String>, key: Scalar, value: Kind) -> Self {
        Self::new(name, FieldType::Map(key, value))
    }

    /// Mark as declared with the `optional` keyword.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.presence = !self.ty.is_collection();
        self
    }

    /// Mark as the resource identifier.
    #[must_use]
    pub fn resource_id(mut self) -> Self {
        self.annotations.resource_id = true;
        self
    }

    /// Mark as the tenant identifier.
    #[must_use]
    pub fn tenant_id(mut self) -> Self {
        self.annotations.tenant_id = true;
        self
    }

    /// Mark as a named attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.annotations.attribute_name = Some(name.into());
        self
    }
}
