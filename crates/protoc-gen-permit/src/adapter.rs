// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Descriptor pool to [`Schema`] adaptation.
//!
//! Every message of the pool is adapted, since request types reference
//! messages of imported files. Only the files `protoc` asked for become
//! [`FileDef`]s.
//!
//! Field shapes follow what prost generates:
//!
//! | Descriptor | [`FieldDef`] |
//! |------------|--------------|
//! | repeated | [`FieldType::List`] |
//! | map | [`FieldType::Map`], entry message dropped |
//! | `optional` keyword | `optional`, presence on scalars |
//! | singular message | presence |
//! | member of a real `oneof` | omitted |

use anyhow::{Context, Result};
use permit_codegen::schema::{
    FieldDef, FieldType, FileDef, Kind, MessageDef, MessageRef, MethodDef, Scalar, Schema,
    ServiceDef
};
use prost_reflect::{
    DescriptorPool, FieldDescriptor, FileDescriptor, MessageDescriptor, MethodDescriptor,
    ServiceDescriptor
};
use prost_types::field_descriptor_proto::Label;
use tracing::debug;

use crate::annotations::Annotations;

/// Adapt `pool` into a schema holding every message and the services of
/// `files`.
///
/// # Errors
///
/// Fails when a file to generate is missing from the pool.
pub fn adapt(pool: &DescriptorPool, files: &[String], annotations: &Annotations) -> Result<Schema> {
    let mut schema = Schema::new();
    for message in pool.all_messages().filter(|message| !message.is_map_entry()) {
        schema.add_message(adapt_message(&message, annotations));
    }
    for name in files {
        let file = pool
            .get_file_by_name(name)
            .with_context(|| format!("file `{name}` is not in the request"))?;
        schema.add_file(adapt_file(&file, annotations));
    }
    debug!(files = files.len(), "descriptors adapted");
    Ok(schema)
}

fn adapt_message(descriptor: &MessageDescriptor, annotations: &Annotations) -> MessageDef {
    let mut message =
        MessageDef::new(descriptor.package_name(), descriptor.name()).nested_in(parents(descriptor));
    if let Some(label) = annotations.resource_type(&descriptor.options()) {
        message = message.resource_type(label);
    }

    let proto2 = matches!(descriptor.parent_file().file_descriptor_proto().syntax(), "" | "proto2");
    for field in descriptor.fields() {
        if in_real_oneof(&field) {
            debug!(field = %field.full_name(), "oneof member omitted");
            continue;
        }
        message = message.field(adapt_field(&field, proto2, annotations));
    }
    message
}

/// Enclosing message names, outermost first.
fn parents(descriptor: &MessageDescriptor) -> Vec<String> {
    let mut parents = Vec::new();
    let mut current = descriptor.parent_message();
    while let Some(parent) = current {
        parents.push(parent.name().to_owned());
        current = parent.parent_message();
    }
    parents.reverse();
    parents
}

fn in_real_oneof(field: &FieldDescriptor) -> bool {
    field.containing_oneof().is_some() && !field.field_descriptor_proto().proto3_optional()
}

fn adapt_field(field: &FieldDescriptor, proto2: bool, annotations: &Annotations) -> FieldDef {
    let mut def = FieldDef::new(field.name(), field_type(field));

    let proto = field.field_descriptor_proto();
    if proto.proto3_optional() || (proto2 && proto.label() == Label::Optional) {
        def = def.optional();
    }

    let options = field.options();
    if annotations.resource_id(&options) {
        def = def.resource_id();
    }
    if annotations.tenant_id(&options) {
        def = def.tenant_id();
    }
    if let Some(name) = annotations.attribute_name(&options) {
        def = def.attribute(name);
    }
    def
}

fn field_type(field: &FieldDescriptor) -> FieldType {
    if let (true, prost_reflect::Kind::Message(entry)) = (field.is_map(), field.kind()) {
        // map keys are always scalar
        let key = match kind(&entry.map_entry_key_field().kind()) {
            Kind::Scalar(scalar) => scalar,
            _ => Scalar::String
        };
        return FieldType::Map(key, kind(&entry.map_entry_value_field().kind()));
    }

    let kind = kind(&field.kind());
    if field.is_list() {
        FieldType::List(kind)
    } else {
        FieldType::Single(kind)
    }
}

fn kind(kind: &prost_reflect::Kind) -> Kind {
    use prost_reflect::Kind as K;

    match kind {
        K::Double => Kind::Scalar(Scalar::Double),
        K::Float => Kind::Scalar(Scalar::Float),
        K::Int32 | K::Sint32 | K::Sfixed32 => Kind::Scalar(Scalar::Int32),
        K::Int64 | K::Sint64 | K::Sfixed64 => Kind::Scalar(Scalar::Int64),
        K::Uint32 | K::Fixed32 => Kind::Scalar(Scalar::UInt32),
        K::Uint64 | K::Fixed64 => Kind::Scalar(Scalar::UInt64),
        K::Bool => Kind::Scalar(Scalar::Bool),
        K::String => Kind::Scalar(Scalar::String),
        K::Bytes => Kind::Scalar(Scalar::Bytes),
        K::Enum(enumeration) => Kind::Enum(enumeration.full_name().to_owned()),
        K::Message(message) => Kind::Message(MessageRef::new(message.full_name()))
    }
}

fn adapt_file(file: &FileDescriptor, annotations: &Annotations) -> FileDef {
    file.services()
        .fold(FileDef::new(file.name(), file.package_name()), |def, service| {
            def.service(adapt_service(&service, annotations))
        })
}

fn adapt_service(service: &ServiceDescriptor, annotations: &Annotations) -> ServiceDef {
    service
        .methods()
        .fold(ServiceDef::new(service.name()), |def, method| {
            def.method(adapt_method(&method, annotations))
        })
}

fn adapt_method(method: &MethodDescriptor, annotations: &Annotations) -> MethodDef {
    let options = method.options();
    let mut def = MethodDef::new(method.name(), MessageRef::new(method.input().full_name()));
    if annotations.public(&options) {
        def = def.public();
    }
    if let Some(permission) = annotations.permission(&options) {
        def = def.permission(permission);
    }
    if let Some(mode) = annotations.bulk_check_mode(&options) {
        def = def.bulk_check_mode(mode);
    }
    def
}
