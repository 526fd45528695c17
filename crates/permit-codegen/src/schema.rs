// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema field model.
//!
//! A thin, owned view of the annotated protobuf schema. Descriptor adapters
//! (the `protoc` plugin, build scripts, tests) fill a [`Schema`]; the engine
//! only reads it.
//!
//! # Architecture
//!
//! ```text
//! schema.rs (registry)
//! ├── field.rs    - FieldDef, FieldType, Kind, Scalar, annotations
//! ├── message.rs  - MessageDef
//! └── service.rs  - FileDef, ServiceDef, MethodDef, BulkCheckMode
//! ```
//!
//! # Example
//!
//! ```rust
//! use permit_codegen::schema::{FieldDef, MessageDef, Scalar, Schema};
//!
//! let mut schema = Schema::new();
//! schema.add_message(
//!     MessageDef::new("acme.v1", "Document")
//!         .resource_type("document")
//!         .field(FieldDef::scalar("id", Scalar::String).resource_id())
//! );
//!
//! let document = schema.message(&"acme.v1.Document".into());
//! assert_eq!(document.and_then(|m| m.resource_type.as_deref()), Some("document"));
//! ```

mod field;
mod message;
mod service;

use std::collections::BTreeMap;

pub use field::{FieldAnnotations, FieldDef, FieldType, Kind, MessageRef, Scalar};
pub use message::MessageDef;
pub use service::{BulkCheckMode, FileDef, MethodDef, ServiceDef};

/// Every known message plus the files to generate.
///
/// Messages of imported files are registered too, so references crossing
/// file boundaries resolve; only [`Schema::files`] produce output.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    messages: BTreeMap<MessageRef, MessageDef>,
    files:    Vec<FileDef>
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a message, replacing a previous one with the same full name.
    pub fn add_message(&mut self, message: MessageDef) {
        self.messages.insert(message.reference(), message);
    }

    /// Register a file to generate.
    pub fn add_file(&mut self, file: FileDef) {
        self.files.push(file);
    }

    /// Look a message up by reference.
    #[must_use]
    pub fn message(&self, reference: &MessageRef) -> Option<&MessageDef> {
        self.messages.get(reference)
    }

    /// All registered messages, ordered by full name.
    pub fn messages(&self) -> impl Iterator<Item = &MessageDef> {
        self.messages.values()
    }

    /// Files to generate, in registration order.
    #[must_use]
    pub fn files(&self) -> &[FileDef] {
        &self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_messages() {
        let mut schema = Schema::new();
        schema.add_message(MessageDef::new("acme.v1", "Folder"));
        assert!(schema.message(&".acme.v1.Folder".into()).is_some());
        assert!(schema.message(&"acme.v1.Missing".into()).is_none());
    }

    #[test]
    fn files_keep_registration_order() {
        let mut schema = Schema::new();
        schema.add_file(FileDef::new("b.proto", "acme.v1"));
        schema.add_file(FileDef::new("a.proto", "acme.v1"));
        let names: Vec<_> = schema.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["b.proto", "a.proto"]);
    }

    #[test]
    fn id_kinds() {
        assert!(Kind::Scalar(Scalar::String).is_id());
        assert!(Kind::Scalar(Scalar::UInt32).is_id());
        assert!(Kind::Enum("acme.v1.State".into()).is_id());
        assert!(!Kind::Scalar(Scalar::Bool).is_id());
        assert!(!Kind::Scalar(Scalar::Double).is_id());
        assert!(!Kind::Scalar(Scalar::Bytes).is_id());
        assert!(!Kind::Message("acme.v1.Folder".into()).is_id());
    }

    #[test]
    fn optional_keyword_tracks_presence() {
        let field = FieldDef::scalar("tenant", Scalar::String).optional();
        assert!(field.optional);
        assert!(field.presence);
    }

    #[test]
    fn field_type_display() {
        let ty = FieldType::Map(Scalar::String, Kind::Message("acme.v1.Folder".into()));
        assert_eq!(ty.to_string(), "map<string, message acme.v1.Folder>");
        assert_eq!(FieldType::List(Kind::Scalar(Scalar::Bool)).to_string(), "repeated bool");
    }
}
