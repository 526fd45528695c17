// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Accumulated schema violations.
//!
//! Nothing in the engine aborts on a violation. Each one is reported to a
//! [`Diagnostics`] sink and generation continues with best-effort defaults,
//! so one run surfaces every problem of every file. The run has failed when
//! the sink is non-empty at the end.

use std::fmt;

use thiserror::Error;

/// One schema violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum Diagnostic {
    /// A gated method carries no permission or action.
    #[error("method {service}.{method} must specify a permission or be marked public")]
    MissingPermissionOrPublic {
        /// Service name.
        service: String,
        /// Method name.
        method:  String
    },

    /// A gated method's request reaches no message with a resource type.
    #[error(
        "method {service}.{method} requires a resource: no message reachable from {request} declares a resource_type"
    )]
    MissingResourceForGatedMethod {
        /// Service name.
        service: String,
        /// Method name.
        method:  String,
        /// Request message full name.
        request: String
    },

    /// A method is both public and gated by a permission.
    #[error(
        "method {service}.{method} is marked public but also requires permission \"{permission}\""
    )]
    ConflictingAccessAnnotations {
        /// Service name.
        service:    String,
        /// Method name.
        method:     String,
        /// The conflicting permission.
        permission: String
    },

    /// The resource id field has a value kind that cannot identify anything.
    #[error(
        "{message}.{field} must be a string, enum, or integer type or a list or map of those types, found {found}"
    )]
    InvalidIdFieldType {
        /// Message declaring the field.
        message: String,
        /// Field name.
        field:   String,
        /// Declared type.
        found:   String
    },

    /// The tenant field has a value kind that cannot name a tenant.
    #[error("{message}.{field} must be a string, enum, or integer type, found {found}")]
    InvalidTenantFieldType {
        /// Message declaring the field.
        message: String,
        /// Field name.
        field:   String,
        /// Declared type.
        found:   String
    },

    /// An attribute field holds messages.
    #[error(
        "attribute \"{attribute}\" on {message}.{field} must be a scalar or enum, or a list or map of those, found {found}"
    )]
    InvalidAttributeFieldType {
        /// Message declaring the field.
        message:   String,
        /// Field name.
        field:     String,
        /// Attribute name.
        attribute: String,
        /// Declared type.
        found:     String
    },

    /// Two fields of one resource declare the same attribute name.
    #[error("attribute \"{attribute}\" of resource {resource} is declared at both {first} and {second}")]
    DuplicateAttributeName {
        /// Resource message full name.
        resource:  String,
        /// Attribute name.
        attribute: String,
        /// Path of the earlier declaration.
        first:     String,
        /// Path of the later declaration.
        second:    String
    },

    /// Two methods share a request type but disagree on access.
    #[error("request type {request} is used by {first} and {second} with different access annotations")]
    ConflictingRequestType {
        /// Request message full name.
        request: String,
        /// Method that emitted the request type.
        first:   String,
        /// Method that conflicts with it.
        second:  String
    },

    /// The formatter rejected the emitted code.
    #[error("failed to render code for {file}: {message}")]
    Render {
        /// Schema file name.
        file:    String,
        /// Formatter message.
        message: String
    }
}

/// Ordered, de-duplicated diagnostic sink.
///
/// # Example
///
/// ```rust
/// use permit_codegen::{Diagnostic, Diagnostics};
///
/// let mut diagnostics = Diagnostics::new();
/// let missing = Diagnostic::MissingPermissionOrPublic {
///     service: "Docs".into(),
///     method:  "Get".into()
/// };
/// diagnostics.report(missing.clone());
/// diagnostics.report(missing);
///
/// assert_eq!(diagnostics.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>
}

impl Diagnostics {
    /// Create an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a violation unless an identical one was recorded before.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if !self.items.contains(&diagnostic) {
            tracing::debug!(%diagnostic, "schema violation");
            self.items.push(diagnostic);
        }
    }

    /// Check if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Take the violations out of the sink.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, diagnostic) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
