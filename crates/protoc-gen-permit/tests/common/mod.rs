// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hand-built descriptors carrying encoded custom options.
//!
//! The structs below are wire-compatible subsets of `descriptor.proto` with
//! the annotation extensions as ordinary fields, so options encode the way
//! `protoc` would write them.

#![allow(dead_code)]

use prost::Message;
use prost_types::field_descriptor_proto::{Label, Type};
use protoc_gen_permit::PluginRequest;

pub const DOCS_PROTO: &str = "acme/v1/docs.proto";

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileProto {
    #[prost(string, tag = "1")]
    pub name:         String,
    #[prost(string, tag = "2")]
    pub package:      String,
    #[prost(string, repeated, tag = "3")]
    pub dependency:   Vec<String>,
    #[prost(message, repeated, tag = "4")]
    pub message_type: Vec<MessageProto>,
    #[prost(message, repeated, tag = "5")]
    pub enum_type:    Vec<EnumProto>,
    #[prost(message, repeated, tag = "6")]
    pub service:      Vec<ServiceProto>,
    #[prost(message, repeated, tag = "7")]
    pub extension:    Vec<FieldProto>,
    #[prost(string, tag = "12")]
    pub syntax:       String
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageProto {
    #[prost(string, tag = "1")]
    pub name:            String,
    #[prost(message, repeated, tag = "2")]
    pub field:           Vec<FieldProto>,
    #[prost(message, repeated, tag = "3")]
    pub nested_type:     Vec<MessageProto>,
    #[prost(message, repeated, tag = "5")]
    pub extension_range: Vec<ExtensionRange>,
    #[prost(message, optional, tag = "7")]
    pub options:         Option<MessageOptions>,
    #[prost(message, repeated, tag = "8")]
    pub oneof_decl:      Vec<OneofProto>
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExtensionRange {
    #[prost(int32, tag = "1")]
    pub start: i32,
    #[prost(int32, tag = "2")]
    pub end:   i32
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageOptions {
    #[prost(bool, optional, tag = "7")]
    pub map_entry:     Option<bool>,
    #[prost(string, optional, tag = "50100")]
    pub resource_type: Option<String>
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OneofProto {
    #[prost(string, tag = "1")]
    pub name: String
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldProto {
    #[prost(string, tag = "1")]
    pub name:            String,
    #[prost(string, tag = "2")]
    pub extendee:        String,
    #[prost(int32, tag = "3")]
    pub number:          i32,
    #[prost(int32, tag = "4")]
    pub label:           i32,
    #[prost(int32, tag = "5")]
    pub r#type:          i32,
    #[prost(string, tag = "6")]
    pub type_name:       String,
    #[prost(message, optional, tag = "8")]
    pub options:         Option<FieldOptions>,
    #[prost(int32, optional, tag = "9")]
    pub oneof_index:     Option<i32>,
    #[prost(bool, optional, tag = "17")]
    pub proto3_optional: Option<bool>
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldOptions {
    #[prost(bool, optional, tag = "50101")]
    pub resource_id:    Option<bool>,
    #[prost(bool, optional, tag = "50102")]
    pub tenant_id:      Option<bool>,
    #[prost(string, optional, tag = "50103")]
    pub attribute_name: Option<String>
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnumProto {
    #[prost(string, tag = "1")]
    pub name:  String,
    #[prost(message, repeated, tag = "2")]
    pub value: Vec<EnumValueProto>
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnumValueProto {
    #[prost(string, tag = "1")]
    pub name:   String,
    #[prost(int32, optional, tag = "2")]
    pub number: Option<i32>
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceProto {
    #[prost(string, tag = "1")]
    pub name:   String,
    #[prost(message, repeated, tag = "2")]
    pub method: Vec<MethodProto>
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MethodProto {
    #[prost(string, tag = "1")]
    pub name:        String,
    #[prost(string, tag = "2")]
    pub input_type:  String,
    #[prost(string, tag = "3")]
    pub output_type: String,
    #[prost(message, optional, tag = "4")]
    pub options:     Option<MethodOptions>
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MethodOptions {
    #[prost(bool, optional, tag = "50104")]
    pub public:          Option<bool>,
    #[prost(string, optional, tag = "50105")]
    pub permission:      Option<String>,
    #[prost(string, optional, tag = "50106")]
    pub action:          Option<String>,
    #[prost(int32, optional, tag = "50107")]
    pub bulk_check_mode: Option<i32>
}

pub fn field(name: &str, number: i32, ty: Type) -> FieldProto {
    FieldProto {
        name: name.into(),
        number,
        label: Label::Optional as i32,
        r#type: ty as i32,
        ..Default::default()
    }
}

pub fn message_field(name: &str, number: i32, type_name: &str) -> FieldProto {
    FieldProto {
        type_name: type_name.into(),
        ..field(name, number, Type::Message)
    }
}

pub fn repeated(field: FieldProto) -> FieldProto {
    FieldProto {
        label: Label::Repeated as i32,
        ..field
    }
}

pub fn annotated(field: FieldProto, options: FieldOptions) -> FieldProto {
    FieldProto {
        options: Some(options),
        ..field
    }
}

pub fn method(name: &str, input: &str, options: MethodOptions) -> MethodProto {
    MethodProto {
        name:        name.into(),
        input_type:  input.into(),
        output_type: ".acme.v1.Empty".into(),
        options:     Some(options)
    }
}

fn options_message(name: &str, fields: Vec<FieldProto>) -> MessageProto {
    MessageProto {
        name: name.into(),
        field: fields,
        extension_range: vec![ExtensionRange {
            start: 1000,
            end:   536_870_912
        }],
        ..Default::default()
    }
}

/// The option messages the annotations extend.
pub fn descriptor_file() -> FileProto {
    FileProto {
        name: "google/protobuf/descriptor.proto".into(),
        package: "google.protobuf".into(),
        message_type: vec![
            options_message("MessageOptions", vec![field("map_entry", 7, Type::Bool)]),
            options_message("FieldOptions", Vec::new()),
            options_message("MethodOptions", Vec::new()),
        ],
        syntax: "proto2".into(),
        ..Default::default()
    }
}

/// `permit/v1/permit.proto`.
pub fn annotations_file() -> FileProto {
    let extension = |name: &str, number: i32, ty: Type, extendee: &str| FieldProto {
        extendee: format!(".google.protobuf.{extendee}"),
        ..field(name, number, ty)
    };
    FileProto {
        name: "permit/v1/permit.proto".into(),
        package: "permit.v1".into(),
        dependency: vec!["google/protobuf/descriptor.proto".into()],
        enum_type: vec![EnumProto {
            name:  "BulkCheckMode".into(),
            value: vec![
                EnumValueProto {
                    name:   "ALL_OF".into(),
                    number: Some(0)
                },
                EnumValueProto {
                    name:   "ANY_OF".into(),
                    number: Some(1)
                },
            ]
        }],
        extension: vec![
            extension("resource_type", 50100, Type::String, "MessageOptions"),
            extension("resource_id", 50101, Type::Bool, "FieldOptions"),
            extension("tenant_id", 50102, Type::Bool, "FieldOptions"),
            extension("attribute_name", 50103, Type::String, "FieldOptions"),
            extension("public", 50104, Type::Bool, "MethodOptions"),
            extension("permission", 50105, Type::String, "MethodOptions"),
            extension("action", 50106, Type::String, "MethodOptions"),
            FieldProto {
                type_name: ".permit.v1.BulkCheckMode".into(),
                ..extension("bulk_check_mode", 50107, Type::Enum, "MethodOptions")
            },
        ],
        syntax: "proto3".into(),
        ..Default::default()
    }
}

/// `acme/v1/docs.proto`: a resource, a batch wrapping it through a list, a
/// map and a nested message, and a service using every method annotation.
pub fn docs_file(service: Vec<MethodProto>) -> FileProto {
    let document = MessageProto {
        name: "Document".into(),
        field: vec![
            annotated(field("id", 1, Type::String), FieldOptions {
                resource_id: Some(true),
                ..Default::default()
            }),
            annotated(field("tenant", 2, Type::String), FieldOptions {
                tenant_id: Some(true),
                ..Default::default()
            }),
            annotated(repeated(field("tags", 3, Type::String)), FieldOptions {
                attribute_name: Some("tags".into()),
                ..Default::default()
            }),
            FieldProto {
                oneof_index: Some(1),
                proto3_optional: Some(true),
                ..field("note", 4, Type::String)
            },
            FieldProto {
                oneof_index: Some(0),
                ..field("alpha", 5, Type::String)
            },
            FieldProto {
                oneof_index: Some(0),
                ..field("beta", 6, Type::Int64)
            },
        ],
        options: Some(MessageOptions {
            resource_type: Some("document".into()),
            ..Default::default()
        }),
        oneof_decl: vec![
            OneofProto {
                name: "choice".into()
            },
            OneofProto {
                name: "_note".into()
            },
        ],
        ..Default::default()
    };

    let batch = MessageProto {
        name: "Batch".into(),
        field: vec![
            repeated(message_field("documents", 1, ".acme.v1.Document")),
            repeated(message_field("by_key", 2, ".acme.v1.Batch.ByKeyEntry")),
        ],
        nested_type: vec![
            MessageProto {
                name: "ByKeyEntry".into(),
                field: vec![
                    field("key", 1, Type::String),
                    message_field("value", 2, ".acme.v1.Document"),
                ],
                options: Some(MessageOptions {
                    map_entry: Some(true),
                    ..Default::default()
                }),
                ..Default::default()
            },
            MessageProto {
                name: "Entry".into(),
                field: vec![message_field("document", 1, ".acme.v1.Document")],
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    let empty = MessageProto {
        name: "Empty".into(),
        ..Default::default()
    };

    FileProto {
        name: DOCS_PROTO.into(),
        package: "acme.v1".into(),
        dependency: vec!["permit/v1/permit.proto".into()],
        message_type: vec![document, batch, empty],
        service: vec![ServiceProto {
            name:   "Docs".into(),
            method: service
        }],
        syntax: "proto3".into(),
        ..Default::default()
    }
}

/// Methods exercising every method annotation.
pub fn docs_methods() -> Vec<MethodProto> {
    vec![
        method("Get", ".acme.v1.Document", MethodOptions {
            permission: Some("read".into()),
            ..Default::default()
        }),
        method("Process", ".acme.v1.Batch", MethodOptions {
            action: Some("process".into()),
            bulk_check_mode: Some(1),
            ..Default::default()
        }),
        method("Health", ".acme.v1.Empty", MethodOptions {
            public: Some(true),
            ..Default::default()
        }),
    ]
}

pub fn request(docs: FileProto, parameter: Option<&str>) -> PluginRequest {
    PluginRequest {
        file_to_generate: vec![DOCS_PROTO.into()],
        parameter:        parameter.map(str::to_owned),
        proto_file:       [descriptor_file(), annotations_file(), docs]
            .iter()
            .map(FileProto::encode_to_vec)
            .collect()
    }
}
