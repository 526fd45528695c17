// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Marker comment at the top of generated files.
//!
//! Tools such as GitHub's linguist and rustfmt recognise `@generated` and
//! skip or collapse the file.

/// Name written into the marker.
pub const GENERATOR: &str = "protoc-gen-permit";

/// Header lines for a file generated from `source`.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(
///     header("acme/v1/docs.proto"),
///     "// @generated by protoc-gen-permit from acme/v1/docs.proto. DO NOT EDIT.\n\n"
/// );
/// ```
#[must_use]
pub fn header(source: &str) -> String {
    format!("// @generated by {GENERATOR} from {source}. DO NOT EDIT.\n\n")
}
