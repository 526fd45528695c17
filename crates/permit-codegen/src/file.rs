// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-file generation.
//!
//! Every schema file with at least one service yields one Rust source unit
//! holding a `GetChecks` impl per distinct request type. The file is meant to
//! be `include!`d next to the prost output of the same package.
//!
//! Each file gets a fresh [`NameContext`], so loop variables depend only on
//! the file's own content.

use std::collections::BTreeMap;

use quote::quote;
use tracing::{debug, warn};

use crate::{
    config::Config,
    diagnostic::{Diagnostic, Diagnostics},
    emit::{Emitter, NameContext, get_checks_impl, type_path},
    method::{AccessKey, Method},
    schema::{FileDef, MessageRef, Schema},
    service::Service,
    utils::marker
};

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path relative to the output directory.
    pub name: String,

    /// Formatted Rust source.
    pub content: String
}

/// Output path for a schema file: `acme/v1/docs.proto` becomes
/// `acme/v1/docs_permit.rs` with the default suffix.
#[must_use]
pub fn output_name(source: &str, suffix: &str) -> String {
    let stem = source.strip_suffix(".proto").unwrap_or(source);
    format!("{stem}{suffix}")
}

/// Generate the source unit of one schema file.
///
/// Returns `None` for files without services and when the emitted code
/// cannot be formatted; the latter is reported.
pub fn generate_file(
    schema: &Schema,
    file: &FileDef,
    config: &Config,
    diagnostics: &mut Diagnostics
) -> Option<GeneratedFile> {
    if file.services.is_empty() {
        debug!(file = %file.name, "no services");
        return None;
    }

    let runtime = config.runtime_crate();
    let mut names = NameContext::new();
    let mut emitted: BTreeMap<MessageRef, (String, AccessKey)> = BTreeMap::new();
    let mut items = Vec::new();

    for def in &file.services {
        let service = Service::resolve(schema, def, diagnostics);
        for method in &service.methods {
            if !claim(schema, file, method, &mut emitted, diagnostics) {
                continue;
            }
            let Some(request) = schema.message(&method.request) else {
                continue;
            };
            let body = method.body(&mut Emitter::new(runtime, &mut names));
            items.push(get_checks_impl(runtime, &type_path(request), &body));
        }
    }

    let tokens = quote!(#(#items)*);
    let parsed = match syn::parse2::<syn::File>(tokens) {
        Ok(parsed) => parsed,
        Err(err) => {
            diagnostics.report(Diagnostic::Render {
                file:    file.name.clone(),
                message: err.to_string()
            });
            return None;
        }
    };

    debug!(file = %file.name, impls = items.len(), "file generated");
    Some(GeneratedFile {
        name:    output_name(&file.name, config.file_suffix()),
        content: format!("{}{}", marker::header(&file.name), prettyplease::unparse(&parsed))
    })
}

/// Decide whether `method` emits the impl of its request type.
///
/// A request type is emitted once per file. A later method with the same
/// access annotations is skipped; one with different annotations is a
/// conflict.
fn claim(
    schema: &Schema,
    file: &FileDef,
    method: &Method,
    emitted: &mut BTreeMap<MessageRef, (String, AccessKey)>,
    diagnostics: &mut Diagnostics
) -> bool {
    let Some(request) = schema.message(&method.request) else {
        warn!(request = %method.request, "unresolved request message");
        return false;
    };
    if request.package != file.package {
        warn!(
            request = %method.request,
            method = %method.label(),
            "request type from another package skipped"
        );
        return false;
    }

    let key = method.access_key();
    match emitted.get(&method.request) {
        Some((first, existing)) if *existing == key => {
            debug!(request = %method.request, first = %first, "request type already emitted");
            false
        }
        Some((first, _)) => {
            diagnostics.report(Diagnostic::ConflictingRequestType {
                request: method.request.to_string(),
                first:   first.clone(),
                second:  method.label()
            });
            false
        }
        None => {
            emitted.insert(method.request.clone(), (method.label(), key));
            true
        }
    }
}
