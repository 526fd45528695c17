// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resource discovery.
//!
//! Walks a request message's field tree, depth-first in declaration order,
//! to the first message carrying a `resource_type`. Inside that message three
//! independent searches locate the id, the tenant and every attribute.
//!
//! # Rules
//!
//! | Search | Descends into | Skips | Result |
//! |--------|---------------|-------|--------|
//! | resource | singular, repeated and map-valued messages | `optional` fields | first match |
//! | id | singular messages, after the current level | nothing | first match, may be a list or map |
//! | tenant | singular messages, after the current level | lists and maps | first match |
//! | attributes | every message field | nothing | all matches |
//!
//! Every search keeps the messages of the current branch; re-entering one of
//! them ends the branch without a match, so cyclic schemas terminate.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{
    diagnostic::{Diagnostic, Diagnostics},
    path::{AccessPath, Segment},
    schema::{FieldDef, FieldType, MessageDef, MessageRef, Schema}
};

/// Root label of paths starting at the request.
pub const REQUEST_ROOT: &str = "request";

/// Root label of paths starting at the resource.
pub const RESOURCE_ROOT: &str = "resource";

/// Discovered resource of a gated method.
///
/// `path` starts at [`REQUEST_ROOT`]; the id, tenant and attribute paths start
/// at [`RESOURCE_ROOT`], the resource message itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Resource message full name.
    pub name: String,

    /// Resource type label emitted into checks.
    pub resource_type: String,

    /// Path from the request to the resource message.
    pub path: AccessPath,

    /// Path to the id field.
    pub id_path: Option<AccessPath>,

    /// Path to the tenant field.
    pub tenant_path: Option<AccessPath>,

    /// Paths to attribute fields by attribute name.
    pub attribute_paths: BTreeMap<String, AccessPath>
}

impl Resource {
    /// Id path whose leaf can actually identify the resource.
    #[must_use]
    pub fn usable_id_path(&self) -> Option<&AccessPath> {
        self.id_path.as_ref().filter(|path| path.ends_at_id_kind())
    }

    /// Tenant path whose leaf can actually name a tenant.
    #[must_use]
    pub fn usable_tenant_path(&self) -> Option<&AccessPath> {
        self.tenant_path
            .as_ref()
            .filter(|path| path.ends_at_id_kind())
    }

    /// Check if emitted code has to bind the resource instance.
    #[must_use]
    pub fn needs_instance(&self) -> bool {
        self.usable_id_path().is_some()
            || self.usable_tenant_path().is_some()
            || !self.attribute_paths.is_empty()
    }

    /// Check if one request can yield several checks.
    #[must_use]
    pub fn is_multiple(&self) -> bool {
        self.path.crosses_collection()
            || self
                .usable_id_path()
                .is_some_and(AccessPath::crosses_collection)
    }
}

/// Find the resource reachable from `request`.
///
/// Returns `None` when no message with a `resource_type` is reachable.
/// Field-shape violations are reported to `diagnostics`; the offending paths
/// are still recorded.
pub fn discover(
    schema: &Schema,
    request: &MessageRef,
    diagnostics: &mut Diagnostics
) -> Option<Resource> {
    let Some(message) = schema.message(request) else {
        warn!(message = %request, "unresolved request message");
        return None;
    };
    let mut discovery = Discovery {
        schema,
        diagnostics
    };
    discovery.find_resource(message, AccessPath::root(REQUEST_ROOT), &mut Vec::new())
}

/// Singular key of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Id,
    Tenant
}

impl Key {
    fn marks(self, field: &FieldDef) -> bool {
        match self {
            Self::Id => field.annotations.resource_id,
            Self::Tenant => field.annotations.tenant_id
        }
    }
}

/// Field found by a key search.
struct Found<'s> {
    path:  AccessPath,
    field: &'s FieldDef,
    owner: &'s MessageDef
}

struct Discovery<'s, 'd> {
    schema:      &'s Schema,
    diagnostics: &'d mut Diagnostics
}

impl<'s> Discovery<'s, '_> {
    /// Resolve a field's target message, `None` on re-entry or when unknown.
    fn enter(&self, reference: &MessageRef, branch: &[&str]) -> Option<&'s MessageDef> {
        let Some(message) = self.schema.message(reference) else {
            warn!(message = %reference, "unresolved message reference");
            return None;
        };
        if branch.contains(&message.full_name.as_str()) {
            debug!(message = %reference, "cycle pruned");
            return None;
        }
        Some(message)
    }

    fn find_resource(
        &mut self,
        message: &'s MessageDef,
        path: AccessPath,
        branch: &mut Vec<&'s str>
    ) -> Option<Resource> {
        if let Some(resource_type) = &message.resource_type {
            debug!(message = %message.full_name, path = %path, "resource found");
            return Some(self.describe(message, resource_type, path));
        }

        branch.push(&message.full_name);
        let mut found = None;
        for field in message.fields.iter().filter(|field| !field.optional) {
            let Some(target) = field.ty.message_target() else {
                continue;
            };
            debug!(field = %field.name, ty = %field.ty, "inspecting field");
            let Some(next) = self.enter(target, branch) else {
                continue;
            };
            found = self.find_resource(next, path.append(Segment::traverse(field)), branch);
            if found.is_some() {
                break;
            }
        }
        branch.pop();
        found
    }

    fn describe(&mut self, message: &'s MessageDef, resource_type: &str, path: AccessPath) -> Resource {
        let root = AccessPath::root(RESOURCE_ROOT);

        let id_path = self
            .find_key(message, Key::Id, &root, &mut Vec::new())
            .map(|found| {
                if !found.field.ty.value_kind().is_id() {
                    self.diagnostics.report(Diagnostic::InvalidIdFieldType {
                        message: found.owner.full_name.clone(),
                        field:   found.field.name.clone(),
                        found:   found.field.ty.to_string()
                    });
                }
                found.path
            });

        let tenant_path = self
            .find_key(message, Key::Tenant, &root, &mut Vec::new())
            .map(|found| {
                if !found.field.ty.value_kind().is_id() {
                    self.diagnostics.report(Diagnostic::InvalidTenantFieldType {
                        message: found.owner.full_name.clone(),
                        field:   found.field.name.clone(),
                        found:   found.field.ty.to_string()
                    });
                }
                found.path
            });

        let mut attribute_paths = BTreeMap::new();
        self.collect_attributes(message, message, &root, &mut attribute_paths, &mut Vec::new());

        Resource {
            name: message.full_name.clone(),
            resource_type: resource_type.to_owned(),
            path,
            id_path,
            tenant_path,
            attribute_paths
        }
    }

    fn find_key(
        &mut self,
        message: &'s MessageDef,
        key: Key,
        path: &AccessPath,
        branch: &mut Vec<&'s str>
    ) -> Option<Found<'s>> {
        for field in &message.fields {
            if !key.marks(field) {
                continue;
            }
            if key == Key::Tenant && field.ty.is_collection() {
                debug!(field = %field.name, "collection tenant field ignored");
                continue;
            }
            return Some(Found {
                path: path.append(Segment::traverse(field)),
                field,
                owner: message
            });
        }

        branch.push(&message.full_name);
        let mut found = None;
        for field in &message.fields {
            let Some(target) = field.ty.single_message() else {
                continue;
            };
            let Some(next) = self.enter(target, branch) else {
                continue;
            };
            found = self.find_key(next, key, &path.append(Segment::traverse(field)), branch);
            if found.is_some() {
                break;
            }
        }
        branch.pop();
        found
    }

    fn collect_attributes(
        &mut self,
        resource: &MessageDef,
        message: &'s MessageDef,
        path: &AccessPath,
        found: &mut BTreeMap<String, AccessPath>,
        branch: &mut Vec<&'s str>
    ) {
        branch.push(&message.full_name);
        for field in &message.fields {
            if let Some(attribute) = &field.annotations.attribute_name {
                self.record_attribute(resource, message, field, attribute, path, found);
                continue;
            }
            let Some(target) = field.ty.message_target() else {
                continue;
            };
            let Some(next) = self.enter(target, branch) else {
                continue;
            };
            let nested = path.append(Segment::traverse(field));
            self.collect_attributes(resource, next, &nested, found, branch);
        }
        branch.pop();
    }

    fn record_attribute(
        &mut self,
        resource: &MessageDef,
        owner: &MessageDef,
        field: &FieldDef,
        attribute: &str,
        path: &AccessPath,
        found: &mut BTreeMap<String, AccessPath>
    ) {
        if !is_attribute_type(&field.ty) {
            self.diagnostics.report(Diagnostic::InvalidAttributeFieldType {
                message:   owner.full_name.clone(),
                field:     field.name.clone(),
                attribute: attribute.to_owned(),
                found:     field.ty.to_string()
            });
        }
        let leaf = path.append(Segment::read(field));
        debug!(attribute, path = %leaf, "attribute found");
        if let Some(previous) = found.insert(attribute.to_owned(), leaf.clone()) {
            self.diagnostics.report(Diagnostic::DuplicateAttributeName {
                resource:  resource.full_name.clone(),
                attribute: attribute.to_owned(),
                first:     previous.render(),
                second:    leaf.render()
            });
        }
    }
}

/// Check if a field type can carry an attribute value.
#[must_use]
pub fn is_attribute_type(ty: &FieldType) -> bool {
    ty.message_target().is_none()
}
