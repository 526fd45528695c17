// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute map construction.
//!
//! Conversion into `AttributeValue` is chosen from the field kind at
//! generation time, so emitted code needs no conversion traits on prost
//! types:
//!
//! | Kind | Variant |
//! |------|---------|
//! | `bool` | `Bool` |
//! | signed integers, enums | `Int(i64)` |
//! | unsigned integers | `UInt(u64)` |
//! | `float`, `double` | `Float(f64)` |
//! | `string` | `String` |
//! | `bytes` | `Bytes` |
//! | repeated | `List` |
//! | map | `Map`, keys stringified |
//!
//! An attribute behind one or more collections is flattened into a single
//! `List` and left out of the map when nothing was collected.

use proc_macro2::TokenStream;
use quote::quote;

use super::{Emitter, value::Value};
use crate::{
    discover::{Resource, is_attribute_type},
    path::AccessPath,
    schema::{FieldType, Kind, Scalar}
};

impl Emitter<'_> {
    /// Statements binding `attributes` for one resource instance.
    pub(super) fn attributes(&mut self, resource: &Resource, instance: Option<&Value>) -> TokenStream {
        let rt = self.runtime;
        let inserts: Vec<TokenStream> = match instance {
            Some(instance) => resource
                .attribute_paths
                .iter()
                .filter_map(|(name, path)| self.attribute(name, path, instance))
                .collect(),
            None => Vec::new()
        };

        if inserts.is_empty() {
            quote!(let attributes = #rt::Attributes::new();)
        } else {
            quote! {
                let mut attributes = #rt::Attributes::new();
                #(#inserts)*
            }
        }
    }

    fn attribute(&mut self, name: &str, path: &AccessPath, instance: &Value) -> Option<TokenStream> {
        let ty = path.leaf_type()?;
        let rt = self.runtime;
        let segments = path.segments();

        if !path.crosses_collection() {
            return instance.clone().follow(segments).present(|value| {
                let converted = convert(rt, &ty, &value)?;
                Some(quote!(attributes.insert(String::from(#name), #converted);))
            });
        }

        // Message leaves were reported during discovery.
        if !is_attribute_type(&ty) {
            return None;
        }

        let collect = self.walk(&segments, instance.clone(), true, |_, leaf| {
            leaf.and_then(|leaf| {
                leaf.present(|value| {
                    let converted = convert(rt, &ty, &value)?;
                    Some(quote!(values.push(#converted);))
                })
            })
            .unwrap_or_default()
        });
        Some(quote! {
            {
                let mut values: Vec<#rt::AttributeValue> = Vec::new();
                #collect
                if !values.is_empty() {
                    attributes.insert(String::from(#name), #rt::AttributeValue::List(values));
                }
            }
        })
    }
}

/// `AttributeValue` expression for a present value of type `ty`.
///
/// `None` for message-typed values.
fn convert(rt: &syn::Path, ty: &FieldType, value: &Value) -> Option<TokenStream> {
    match ty {
        FieldType::Single(kind) => convert_single(rt, kind, value),
        FieldType::List(kind) => {
            let element = convert_single(rt, kind, &Value::Ref(quote!(v)))?;
            let receiver = value.receiver();
            Some(quote!(#rt::AttributeValue::List(#receiver.iter().map(|v| #element).collect())))
        }
        FieldType::Map(_, kind) => {
            let element = convert_single(rt, kind, &Value::Ref(quote!(v)))?;
            let receiver = value.receiver();
            Some(quote! {
                #rt::AttributeValue::Map(
                    #receiver.iter().map(|(k, v)| (k.to_string(), #element)).collect()
                )
            })
        }
    }
}

fn convert_single(rt: &syn::Path, kind: &Kind, value: &Value) -> Option<TokenStream> {
    let copied = value.copied();
    let receiver = value.receiver();
    let converted = match kind {
        Kind::Message(_) => return None,
        Kind::Enum(_) => quote!(#rt::AttributeValue::Int(i64::from(#copied))),
        Kind::Scalar(scalar) => match scalar {
            Scalar::Bool => quote!(#rt::AttributeValue::Bool(#copied)),
            Scalar::Int32 | Scalar::Int64 => quote!(#rt::AttributeValue::Int(i64::from(#copied))),
            Scalar::UInt32 | Scalar::UInt64 => {
                quote!(#rt::AttributeValue::UInt(u64::from(#copied)))
            }
            Scalar::Float | Scalar::Double => {
                quote!(#rt::AttributeValue::Float(f64::from(#copied)))
            }
            Scalar::String => quote!(#rt::AttributeValue::String(#receiver.clone())),
            Scalar::Bytes => quote!(#rt::AttributeValue::Bytes(#receiver.clone()))
        }
    };
    Some(converted)
}
