// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rust names of schema items and loop variables.
//!
//! Field and type names follow the prost conventions: snake_case fields,
//! UpperCamelCase types, nested types in the snake_case module of their
//! parent, raw identifiers for keywords.

use convert_case::{Case, Casing};
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::Ident;
use tracing::trace;

use crate::schema::MessageDef;

/// Keywords that become raw identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield"
];

/// Keywords that cannot be raw identifiers and get a trailing underscore.
const RESERVED: &[&str] = &["self", "super", "extern", "crate", "Self"];

/// Deterministic loop-variable names for one generated file.
///
/// The counter starts over for every file and is never shared, so
/// regenerating the same schema yields the same names.
///
/// # Example
///
/// ```rust
/// use permit_codegen::emit::NameContext;
///
/// let mut names = NameContext::new();
/// assert_eq!(names.loop_var().to_string(), "v1");
/// assert_eq!(names.loop_var().to_string(), "v2");
/// ```
#[derive(Debug, Default)]
pub struct NameContext {
    issued: usize
}

impl NameContext {
    /// Fresh context, first variable is `v1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// Next loop variable.
    pub fn loop_var(&mut self) -> Ident {
        self.issued += 1;
        let var = format_ident!("v{}", self.issued);
        trace!(%var, "loop variable");
        var
    }

    /// Number of variables handed out so far.
    #[must_use]
    pub const fn issued(&self) -> usize {
        self.issued
    }
}

/// Rust identifier of a schema field.
#[must_use]
pub fn field_ident(name: &str) -> Ident {
    let snake = if is_snake(name) {
        name.to_owned()
    } else {
        name.to_case(Case::Snake)
    };
    sanitize(&snake)
}

/// Path of a message type relative to the module of its package.
#[must_use]
pub fn type_path(message: &MessageDef) -> TokenStream {
    let modules = message
        .parents
        .iter()
        .map(|parent| sanitize(&parent.to_case(Case::Snake)));
    let name = sanitize(&message.name.to_case(Case::Pascal));
    quote!(#(#modules::)* #name)
}

fn is_snake(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn sanitize(name: &str) -> Ident {
    if RESERVED.contains(&name) {
        format_ident!("{}_", name)
    } else if KEYWORDS.contains(&name) {
        Ident::new_raw(name, Span::call_site())
    } else {
        Ident::new(name, Span::call_site())
    }
}
