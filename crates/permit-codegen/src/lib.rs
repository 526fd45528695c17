// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resource discovery and check emission engine behind `protoc-gen-permit`.
//!
//! Given an annotated protobuf schema, the engine emits for every request
//! type of an RPC method a `GetChecks` implementation that computes the
//! authorization checks a call with that payload needs.
//!
//! # Quick Navigation
//!
//! - [`schema`]: Owned view of the annotated schema, filled by adapters
//! - [`path`]: Persistent access paths with collection and presence hops
//! - [`discover`]: Locating the resource, its id, tenant and attributes
//! - [`emit`]: Generating `get_checks` bodies
//! - [`method`] / [`service`] / [`file`]: Assembly into source files
//! - [`Diagnostics`]: Accumulated schema violations
//!
//! # Architecture
//!
//! ```text
//! Schema ──► Service::resolve ──► Method::resolve ──► discover()
//!                                        │                 │
//!                                        ▼                 ▼
//!                             generate_file() ◄──── Emitter (NameContext)
//!                                        │
//!                                        ▼
//!                         prettyplease ──► GeneratedFile
//! ```
//!
//! # Example
//!
//! ```rust
//! use permit_codegen::{
//!     Config, generate,
//!     schema::{FieldDef, FileDef, MessageDef, MethodDef, Scalar, Schema, ServiceDef}
//! };
//!
//! let mut schema = Schema::new();
//! schema.add_message(
//!     MessageDef::new("acme.v1", "GetDocumentRequest")
//!         .resource_type("document")
//!         .field(FieldDef::scalar("id", Scalar::String).resource_id())
//! );
//! schema.add_file(
//!     FileDef::new("acme/v1/docs.proto", "acme.v1").service(
//!         ServiceDef::new("Documents")
//!             .method(MethodDef::new("Get", "acme.v1.GetDocumentRequest").permission("read"))
//!     )
//! );
//!
//! let files = generate(&schema, &Config::default()).into_result().unwrap();
//! assert_eq!(files[0].name, "acme/v1/docs_permit.rs");
//! assert!(files[0].content.contains("impl ::permit_core::GetChecks for GetDocumentRequest"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

pub mod config;
pub mod diagnostic;
pub mod discover;
pub mod emit;
pub mod file;
pub mod method;
pub mod path;
pub mod schema;
pub mod service;
mod utils;

pub use config::{Config, ConfigError};
pub use diagnostic::{Diagnostic, Diagnostics};
pub use file::GeneratedFile;
use tracing::info;

use crate::schema::Schema;

/// Result of a generation run.
#[derive(Debug, Clone, Default)]
pub struct Output {
    /// Generated files, in schema file order.
    pub files: Vec<GeneratedFile>,

    /// Every violation found across all files.
    pub diagnostics: Diagnostics
}

impl Output {
    /// Check if the run found no violation.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Files of a clean run.
    ///
    /// # Errors
    ///
    /// Returns the diagnostics when any violation was found, regardless of
    /// whether files were produced.
    pub fn into_result(self) -> Result<Vec<GeneratedFile>, Diagnostics> {
        if self.diagnostics.is_empty() {
            Ok(self.files)
        } else {
            Err(self.diagnostics)
        }
    }
}

/// Generate every file registered in `schema`.
///
/// Files are generated one after another, each in isolation; violations of
/// all files are collected before the run is judged.
#[must_use]
pub fn generate(schema: &Schema, config: &Config) -> Output {
    let mut output = Output::default();
    for file in schema.files() {
        if let Some(generated) = file::generate_file(schema, file, config, &mut output.diagnostics) {
            output.files.push(generated);
        }
    }
    info!(
        files = output.files.len(),
        violations = output.diagnostics.len(),
        "generation finished"
    );
    output
}
