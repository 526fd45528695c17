// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `protoc` plugin protocol.
//!
//! ```text
//! stdin ──► PluginRequest ──► DescriptorPool ──► adapt() ──► generate()
//!                                                                 │
//! stdout ◄── CodeGeneratorResponse ◄── files, or error lines ◄────┘
//! ```
//!
//! Schema violations are not transport failures: they are returned in
//! `CodeGeneratorResponse.error`, one per line, with no files. `protoc`
//! then exits non-zero without writing anything.

use anyhow::{Context, Result};
use permit_codegen::{Config, GeneratedFile, generate};
use prost::Message;
use prost_reflect::DescriptorPool;
use prost_types::compiler::{
    CodeGeneratorResponse,
    code_generator_response::{Feature, File}
};
use tracing::{info, warn};

use crate::{adapter::adapt, annotations::Annotations};

/// `CodeGeneratorRequest` keeping descriptor files as raw bytes.
///
/// `prost_types::FileDescriptorProto` drops unknown fields, and custom
/// options are unknown fields to it; the pool has to see the raw bytes.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PluginRequest {
    /// Files named on the `protoc` command line.
    #[prost(string, repeated, tag = "1")]
    pub file_to_generate: Vec<String>,

    /// Value of `--permit_opt`.
    #[prost(string, optional, tag = "2")]
    pub parameter: Option<String>,

    /// Encoded `FileDescriptorProto`s of the files and all their imports.
    #[prost(bytes, repeated, tag = "15")]
    pub proto_file: Vec<Vec<u8>>
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct RawFileDescriptorSet {
    #[prost(bytes, repeated, tag = "1")]
    file: Vec<Vec<u8>>
}

impl PluginRequest {
    /// Build the descriptor pool of every file in the request.
    ///
    /// # Errors
    ///
    /// Fails when the descriptors do not form a valid pool.
    pub fn descriptor_pool(&self) -> Result<DescriptorPool> {
        let set = RawFileDescriptorSet {
            file: self.proto_file.clone()
        };
        DescriptorPool::decode(set.encode_to_vec().as_slice()).context("building descriptor pool")
    }
}

/// Run the plugin on an encoded request, returning the encoded response.
///
/// # Errors
///
/// Fails when the request cannot be decoded or its descriptors are
/// inconsistent.
pub fn run(input: &[u8]) -> Result<Vec<u8>> {
    let request = PluginRequest::decode(input).context("decoding CodeGeneratorRequest")?;
    Ok(respond(&request)?.encode_to_vec())
}

/// Answer a decoded request.
///
/// # Errors
///
/// Fails on transport problems only; configuration errors and schema
/// violations are part of the response.
pub fn respond(request: &PluginRequest) -> Result<CodeGeneratorResponse> {
    let config = match Config::from_parameter(request.parameter.as_deref().unwrap_or_default()) {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "invalid plugin parameter");
            return Ok(failure(err.to_string()));
        }
    };

    let pool = request.descriptor_pool()?;
    let annotations = Annotations::load(&pool, config.annotations());
    let schema = adapt(&pool, &request.file_to_generate, &annotations)?;

    Ok(match generate(&schema, &config).into_result() {
        Ok(files) => {
            info!(files = files.len(), "checks generated");
            success(files)
        }
        Err(diagnostics) => {
            warn!(violations = diagnostics.len(), "schema violations found");
            failure(diagnostics.to_string())
        }
    })
}

fn success(files: Vec<GeneratedFile>) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        file: files
            .into_iter()
            .map(|file| File {
                name: Some(file.name),
                content: Some(file.content),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

fn failure(error: String) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(error),
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    }
}
