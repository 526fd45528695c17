// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Message definitions.

use super::{FieldDef, MessageRef};

/// One message of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDef {
    /// Fully-qualified name, e.g. `acme.v1.Folder.Entry`.
    pub full_name: String,

    /// Protobuf package, e.g. `acme.v1`.
    pub package: String,

    /// Short name, e.g. `Entry`.
    pub name: String,

    /// Enclosing message names, outermost first, e.g. `["Folder"]`.
    pub parents: Vec<String>,

    /// Resource type label when the message is an authorizable entity.
    pub resource_type: Option<String>,

    /// Fields in declaration order.
    pub fields: Vec<FieldDef>
}

impl MessageDef {
    /// Create a top-level message with no fields.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        let package = package.into();
        let name = name.into();
        Self {
            full_name: qualify(&package, &[], &name),
            package,
            name,
            parents: Vec::new(),
            resource_type: None,
            fields: Vec::new()
        }
    }

    /// Nest the message inside enclosing messages, outermost first.
    #[must_use]
    pub fn nested_in<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self.full_name = qualify(&self.package, &self.parents, &self.name);
        self
    }

    /// Annotate as an authorizable entity.
    #[must_use]
    pub fn resource_type(mut self, label: impl Into<String>) -> Self {
        self.resource_type = Some(label.into());
        self
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Reference to this message.
    #[must_use]
    pub fn reference(&self) -> MessageRef {
        MessageRef::new(self.full_name.as_str())
    }
}

fn qualify(package: &str, parents: &[String], name: &str) -> String {
    package
        .split('.')
        .filter(|part| !part.is_empty())
        .chain(parents.iter().map(String::as_str))
        .chain(std::iter::once(name))
        .collect::<Vec<_>>()
        .join(".")
}
