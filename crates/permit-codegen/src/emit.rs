// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Check emission.
//!
//! Turns a discovered [`Resource`] into the body of a `get_checks`
//! implementation that builds one check per concrete resource instance of
//! a live request.
//!
//! # Architecture
//!
//! ```text
//! emit.rs (walker, method bodies)
//! ├── value.rs       - place / reference / option expression shapes
//! ├── attributes.rs  - attribute map and value conversion
//! └── names.rs       - loop variables, field and type names
//! ```
//!
//! # Generated Shape
//!
//! ```rust,ignore
//! impl ::permit_core::GetChecks for ListRequest {
//!     fn get_checks(&self) -> ::permit_core::CheckConfig {
//!         let request = self;
//!         let permission = "read";
//!         let mut checks: Vec<::permit_core::Check> = Vec::new();
//!         for v1 in request.documents.iter() {
//!             let resource = v1;
//!             let mut id = String::new();
//!             if !resource.id.is_empty() {
//!                 id = resource.id.to_string();
//!             }
//!             let tenant_id = String::from(::permit_core::DEFAULT_TENANT);
//!             let attributes = ::permit_core::Attributes::new();
//!             checks.push(::permit_core::Check { /* ... */ });
//!         }
//!         let kind = if checks.len() > 1 { Bulk } else { Single };
//!         ::permit_core::CheckConfig { kind, mode: Some(AllOf), checks }
//!     }
//! }
//! ```

mod attributes;
mod names;
mod value;

pub use names::{NameContext, field_ident, type_path};
use proc_macro2::TokenStream;
use quote::quote;
use value::{Value, guarded_assign, stringify};

use crate::{
    discover::{REQUEST_ROOT, RESOURCE_ROOT, Resource},
    path::Segment,
    schema::{BulkCheckMode, FieldType}
};

/// Emits method bodies for one generated file.
pub struct Emitter<'a> {
    runtime: &'a syn::Path,
    names:   &'a mut NameContext
}

impl<'a> Emitter<'a> {
    /// Create an emitter writing runtime types under `runtime`.
    pub fn new(runtime: &'a syn::Path, names: &'a mut NameContext) -> Self {
        Self { runtime, names }
    }

    /// Body of a method that needs no authorization.
    #[must_use]
    pub fn public(&self) -> TokenStream {
        let rt = self.runtime;
        quote! {
            #rt::CheckConfig {
                kind: #rt::CheckKind::Public,
                mode: None,
                checks: Vec::new()
            }
        }
    }

    /// Body of a gated method whose resource could not be discovered.
    #[must_use]
    pub fn unchecked(&self) -> TokenStream {
        let rt = self.runtime;
        quote! {
            #rt::CheckConfig {
                kind: #rt::CheckKind::Single,
                mode: None,
                checks: Vec::new()
            }
        }
    }

    /// Body of a permission-gated method.
    pub fn gated(
        &mut self,
        resource: &Resource,
        permission: &str,
        mode: Option<BulkCheckMode>
    ) -> TokenStream {
        let rt = self.runtime;
        let request = ident(REQUEST_ROOT);
        let segments = resource.path.segments();
        let instances = self.walk(
            &segments,
            Value::Ref(request.clone()),
            resource.needs_instance(),
            |this, instance| this.instance(resource, instance)
        );

        let mode = if resource.is_multiple() {
            let mode = match mode.unwrap_or_default() {
                BulkCheckMode::AllOf => quote!(#rt::BulkCheckMode::AllOf),
                BulkCheckMode::AnyOf => quote!(#rt::BulkCheckMode::AnyOf)
            };
            quote!(Some(#mode))
        } else {
            quote!(None)
        };

        quote! {
            let #request = self;
            let permission = #permission;
            let mut checks: Vec<#rt::Check> = Vec::new();
            #instances
            let kind = if checks.len() > 1 {
                #rt::CheckKind::Bulk
            } else {
                #rt::CheckKind::Single
            };
            #rt::CheckConfig { kind, mode: #mode, checks }
        }
    }

    /// Walk `segments` from `value`, opening one loop per collection hop.
    ///
    /// `leaf` receives the value at the end of the path, or `None` when the
    /// leaf is not needed; the innermost loop then only counts.
    pub(crate) fn walk<F>(
        &mut self,
        segments: &[&Segment],
        value: Value,
        needs_leaf: bool,
        leaf: F
    ) -> TokenStream
    where
        F: FnOnce(&mut Self, Option<Value>) -> TokenStream
    {
        let Some(index) = segments
            .iter()
            .position(|segment| segment.hop().crosses_collection())
        else {
            let value = value.follow(segments.iter().copied());
            return leaf(self, Some(value));
        };

        let elements = value
            .follow(segments[..index].iter().copied())
            .fan_out(segments[index]);
        let rest = &segments[index + 1..];
        let innermost = !rest.iter().any(|segment| segment.hop().crosses_collection());
        if innermost && !needs_leaf {
            let body = leaf(self, None);
            return quote! {
                for _ in #elements {
                    #body
                }
            };
        }

        let var = self.names.loop_var();
        let body = self.walk(rest, Value::Ref(quote!(#var)), needs_leaf, leaf);
        quote! {
            for #var in #elements {
                #body
            }
        }
    }

    /// Checks for one resource instance, fanning out over collection ids.
    fn instance(&mut self, resource: &Resource, instance: Option<Value>) -> TokenStream {
        let (binding, instance) = match instance {
            Some(value) if resource.needs_instance() => {
                let (binding, bound) = value.bind(&ident(RESOURCE_ROOT));
                (binding, Some(bound))
            }
            _ => (TokenStream::new(), None)
        };

        let checks = match (resource.usable_id_path(), &instance) {
            (Some(id_path), Some(bound)) if id_path.crosses_collection() => {
                let segments = id_path.segments();
                self.walk(&segments, bound.clone(), true, |this, id| {
                    let id = id.map_or_else(|| quote!(String::new()), |id| stringify(&id));
                    this.check(resource, instance.as_ref(), quote!(let id = #id;))
                })
            }
            (Some(id_path), Some(bound)) => {
                let leaf = bound.clone().follow(id_path.segments());
                let assign = match id_path.leaf_type() {
                    Some(FieldType::Single(kind)) => guarded_assign(leaf, &kind, &quote!(id)),
                    _ => TokenStream::new()
                };
                let id = quote! {
                    let mut id = String::new();
                    #assign
                };
                self.check(resource, instance.as_ref(), id)
            }
            _ => self.check(resource, instance.as_ref(), quote!(let id = String::new();))
        };

        quote! {
            #binding
            #checks
        }
    }

    /// Tenant, attributes and the pushed check, after `id` is bound.
    fn check(&mut self, resource: &Resource, instance: Option<&Value>, id: TokenStream) -> TokenStream {
        let rt = self.runtime;
        let tenant = match (resource.usable_tenant_path(), instance) {
            (Some(path), Some(bound)) => {
                let leaf = bound.clone().follow(path.segments());
                let assign = match path.leaf_type() {
                    Some(FieldType::Single(kind)) => {
                        guarded_assign(leaf, &kind, &quote!(tenant_id))
                    }
                    _ => TokenStream::new()
                };
                quote! {
                    let mut tenant_id = String::from(#rt::DEFAULT_TENANT);
                    #assign
                }
            }
            _ => quote!(let tenant_id = String::from(#rt::DEFAULT_TENANT);)
        };
        let attributes = self.attributes(resource, instance);
        let resource_type = &resource.resource_type;

        quote! {
            #id
            #tenant
            #attributes
            checks.push(#rt::Check {
                tenant_id,
                permission: String::from(permission),
                resource: #rt::Resource {
                    resource_type: String::from(#resource_type),
                    id,
                    attributes
                }
            });
        }
    }
}

/// `impl GetChecks` block for a request type.
#[must_use]
pub fn get_checks_impl(runtime: &syn::Path, request_type: &TokenStream, body: &TokenStream) -> TokenStream {
    quote! {
        #[allow(unused_variables, unused_mut, clippy::all)]
        impl #runtime::GetChecks for #request_type {
            fn get_checks(&self) -> #runtime::CheckConfig {
                #body
            }
        }
    }
}

fn ident(name: &str) -> TokenStream {
    let ident = syn::Ident::new(name, proc_macro2::Span::call_site());
    quote!(#ident)
}

#[cfg(test)]
mod tests;
