// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Access-control annotations read from descriptor options.
//!
//! Annotations are custom options declared in `permit/v1/permit.proto`:
//!
//! | Option | Extends | Type |
//! |--------|---------|------|
//! | `resource_type` | `MessageOptions` | `string` |
//! | `resource_id` | `FieldOptions` | `bool` |
//! | `tenant_id` | `FieldOptions` | `bool` |
//! | `attribute_name` | `FieldOptions` | `string` |
//! | `public` | `MethodOptions` | `bool` |
//! | `permission` | `MethodOptions` | `string` |
//! | `action` | `MethodOptions` | `string` |
//! | `bulk_check_mode` | `MethodOptions` | `BulkCheckMode` |
//!
//! An option whose extension is not in the descriptor pool reads as absent.

use std::borrow::Cow;

use permit_codegen::schema::BulkCheckMode;
use prost_reflect::{DescriptorPool, DynamicMessage, ExtensionDescriptor, Value};
use tracing::{debug, warn};

/// Extension descriptors of the annotation package.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    resource_type:   Option<ExtensionDescriptor>,
    resource_id:     Option<ExtensionDescriptor>,
    tenant_id:       Option<ExtensionDescriptor>,
    attribute_name:  Option<ExtensionDescriptor>,
    public:          Option<ExtensionDescriptor>,
    permission:      Option<ExtensionDescriptor>,
    action:          Option<ExtensionDescriptor>,
    bulk_check_mode: Option<ExtensionDescriptor>
}

impl Annotations {
    /// Look up the annotation extensions of `package` in `pool`.
    pub fn load(pool: &DescriptorPool, package: &str) -> Self {
        let extension = |name: &str| {
            let full_name = format!("{package}.{name}");
            let found = pool.get_extension_by_name(&full_name);
            if found.is_none() {
                debug!(extension = %full_name, "annotation not declared");
            }
            found
        };
        Self {
            resource_type:   extension("resource_type"),
            resource_id:     extension("resource_id"),
            tenant_id:       extension("tenant_id"),
            attribute_name:  extension("attribute_name"),
            public:          extension("public"),
            permission:      extension("permission"),
            action:          extension("action"),
            bulk_check_mode: extension("bulk_check_mode")
        }
    }

    /// `resource_type` of a message.
    pub fn resource_type(&self, options: &DynamicMessage) -> Option<String> {
        string(options, self.resource_type.as_ref())
    }

    /// `resource_id` of a field.
    pub fn resource_id(&self, options: &DynamicMessage) -> bool {
        flag(options, self.resource_id.as_ref())
    }

    /// `tenant_id` of a field.
    pub fn tenant_id(&self, options: &DynamicMessage) -> bool {
        flag(options, self.tenant_id.as_ref())
    }

    /// `attribute_name` of a field.
    pub fn attribute_name(&self, options: &DynamicMessage) -> Option<String> {
        string(options, self.attribute_name.as_ref())
    }

    /// `public` of a method.
    pub fn public(&self, options: &DynamicMessage) -> bool {
        flag(options, self.public.as_ref())
    }

    /// `permission` of a method, falling back to `action`.
    pub fn permission(&self, options: &DynamicMessage) -> Option<String> {
        string(options, self.permission.as_ref()).or_else(|| string(options, self.action.as_ref()))
    }

    /// `bulk_check_mode` of a method.
    pub fn bulk_check_mode(&self, options: &DynamicMessage) -> Option<BulkCheckMode> {
        match read(options, self.bulk_check_mode.as_ref())?.as_enum_number()? {
            0 => Some(BulkCheckMode::AllOf),
            1 => Some(BulkCheckMode::AnyOf),
            number => {
                warn!(number, "unknown bulk_check_mode ignored");
                None
            }
        }
    }
}

fn read<'a>(
    options: &'a DynamicMessage,
    extension: Option<&ExtensionDescriptor>
) -> Option<Cow<'a, Value>> {
    let extension = extension?;
    options
        .has_extension(extension)
        .then(|| options.get_extension(extension))
}

fn string(options: &DynamicMessage, extension: Option<&ExtensionDescriptor>) -> Option<String> {
    read(options, extension)?
        .as_str()
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn flag(options: &DynamicMessage, extension: Option<&ExtensionDescriptor>) -> bool {
    read(options, extension).and_then(|value| value.as_bool()).unwrap_or(false)
}
