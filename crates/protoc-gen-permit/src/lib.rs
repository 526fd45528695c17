// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `protoc` plugin generating authorization checks from annotated protobuf
//! schemas.
//!
//! ```text
//! protoc --plugin=protoc-gen-permit --permit_out=src/gen acme/v1/docs.proto
//! ```
//!
//! For every request type of an annotated RPC method the plugin writes a
//! `GetChecks` implementation into `<file>_permit.rs`, to be `include!`d next
//! to the prost output of the same package.
//!
//! # Quick Navigation
//!
//! - [`plugin`]: Request decoding and response encoding
//! - [`adapter`]: Descriptor pool to schema adaptation
//! - [`annotations`]: Reading custom options
//! - [`codegen`]: The generation engine
//! - [`runtime`]: Types referenced by generated code
//!
//! # Annotations
//!
//! ```protobuf
//! import "permit/v1/permit.proto";
//!
//! message Document {
//!   option (permit.v1.resource_type) = "document";
//!   string id = 1 [(permit.v1.resource_id) = true];
//!   string tenant = 2 [(permit.v1.tenant_id) = true];
//!   string owner = 3 [(permit.v1.attribute_name) = "owner"];
//! }
//!
//! service Documents {
//!   rpc Get(Document) returns (Document) {
//!     option (permit.v1.permission) = "read";
//!   }
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod adapter;
pub mod annotations;
pub mod plugin;

pub use permit_codegen as codegen;
pub use permit_core as runtime;
pub use plugin::{PluginRequest, respond, run};
