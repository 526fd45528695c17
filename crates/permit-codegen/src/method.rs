// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Method assembly.
//!
//! A method is either `Public` or `Gated`, decided once from its
//! annotations:
//!
//! ```text
//!            public = true ───────────────► Public
//! MethodDef ─┤
//!            otherwise ───────────────────► Gated
//! ```
//!
//! A method that is public and also names a permission is reported as a
//! conflict and still emitted as public. A gated method lacking its
//! permission or its resource is reported and emitted with an empty
//! permission or without checks, so the file keeps generating.

use proc_macro2::TokenStream;
use tracing::debug;

use crate::{
    diagnostic::{Diagnostic, Diagnostics},
    discover::{Resource, discover},
    emit::Emitter,
    schema::{BulkCheckMode, MessageRef, MethodDef, Schema}
};

/// How a method is authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// No authorization.
    Public,

    /// One check per resource instance in the request.
    Gated {
        /// Permission checked for every instance, empty when missing.
        permission: String,

        /// Discovered resource; without one no checks are emitted.
        resource: Option<Resource>
    }
}

/// Access annotations that decide the emitted code of a request type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKey {
    permission: Option<String>,
    mode:       Option<BulkCheckMode>
}

/// A resolved method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Enclosing service name.
    pub service: String,

    /// Method name.
    pub name: String,

    /// Request message.
    pub request: MessageRef,

    /// Access decision.
    pub access: Access,

    /// Bulk combination mode.
    pub bulk_check_mode: Option<BulkCheckMode>
}

impl Method {
    /// Resolve a method definition.
    ///
    /// A gated method lacking a permission or a resource is reported and
    /// still resolved with best-effort defaults.
    pub fn resolve(
        schema: &Schema,
        service: &str,
        def: &MethodDef,
        diagnostics: &mut Diagnostics
    ) -> Self {
        let permission = def.permission.as_deref().filter(|p| !p.is_empty());

        let access = if def.public {
            if let Some(permission) = permission {
                diagnostics.report(Diagnostic::ConflictingAccessAnnotations {
                    service:    service.to_owned(),
                    method:     def.name.clone(),
                    permission: permission.to_owned()
                });
            }
            Access::Public
        } else {
            let resource = discover(schema, &def.input, diagnostics);
            if permission.is_none() {
                diagnostics.report(Diagnostic::MissingPermissionOrPublic {
                    service: service.to_owned(),
                    method:  def.name.clone()
                });
            }
            if resource.is_none() {
                diagnostics.report(Diagnostic::MissingResourceForGatedMethod {
                    service: service.to_owned(),
                    method:  def.name.clone(),
                    request: def.input.to_string()
                });
            }
            Access::Gated {
                permission: permission.unwrap_or_default().to_owned(),
                resource
            }
        };

        debug!(service, method = %def.name, public = access.is_public(), "method resolved");
        Self {
            service: service.to_owned(),
            name: def.name.clone(),
            request: def.input.clone(),
            access,
            bulk_check_mode: def.bulk_check_mode
        }
    }

    /// Check if the method needs no authorization.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.access.is_public()
    }

    /// Checked permission, empty for public methods.
    #[must_use]
    pub fn permission(&self) -> &str {
        match &self.access {
            Access::Public => "",
            Access::Gated { permission, .. } => permission
        }
    }

    /// Discovered resource of a gated method.
    #[must_use]
    pub const fn resource(&self) -> Option<&Resource> {
        match &self.access {
            Access::Public => None,
            Access::Gated { resource, .. } => resource.as_ref()
        }
    }

    /// `Service.Method`, for diagnostics.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}.{}", self.service, self.name)
    }

    /// Annotations deciding the emitted code.
    #[must_use]
    pub fn access_key(&self) -> AccessKey {
        match &self.access {
            Access::Public => AccessKey {
                permission: None,
                mode:       None
            },
            Access::Gated { permission, .. } => AccessKey {
                permission: Some(permission.clone()),
                mode:       self.bulk_check_mode
            }
        }
    }

    /// Body of `get_checks` for the request type.
    pub fn body(&self, emitter: &mut Emitter<'_>) -> TokenStream {
        match &self.access {
            Access::Public => emitter.public(),
            Access::Gated {
                permission,
                resource: Some(resource)
            } => emitter.gated(resource, permission, self.bulk_check_mode),
            Access::Gated {
                resource: None, ..
            } => emitter.unchecked()
        }
    }
}

impl Access {
    /// Check if no authorization is required.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}
