// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Expressions for values along an access path.
//!
//! Every intermediate value of a path is one of three shapes, and each hop
//! maps a shape to the next:
//!
//! | From | `Field` | `Optional` |
//! |------|---------|------------|
//! | `Place(p)` / `Ref(r)` | `Place(p.f)` | `Maybe(p.f.as_ref())` |
//! | `Maybe(e)` | `Maybe(e.map(\|v\| &v.f))` | `Maybe(e.and_then(\|v\| v.f.as_ref()))` |
//!
//! Collection hops are never folded; they become the iterator of a loop
//! whose variable is a `Ref`.

use proc_macro2::TokenStream;
use quote::quote;

use super::names::field_ident;
use crate::{
    path::{Hop, Segment},
    schema::{Kind, Scalar}
};

/// Shape of an expression.
#[derive(Debug, Clone)]
pub(crate) enum Value {
    /// Place expression of type `T`, e.g. `resource.id`.
    Place(TokenStream),

    /// Expression of type `&T`, e.g. a loop variable.
    Ref(TokenStream),

    /// Expression of type `Option<&T>`.
    Maybe(TokenStream)
}

impl Value {
    /// Apply a non-collection hop.
    pub(crate) fn step(self, segment: &Segment) -> Self {
        let field = field_ident(segment.name());
        match (self, segment.hop()) {
            (Self::Place(base) | Self::Ref(base), Hop::Optional) => {
                Self::Maybe(quote!(#base.#field.as_ref()))
            }
            (Self::Maybe(base), Hop::Optional) => {
                Self::Maybe(quote!(#base.and_then(|v| v.#field.as_ref())))
            }
            (Self::Maybe(base), _) => Self::Maybe(quote!(#base.map(|v| &v.#field))),
            (Self::Place(base) | Self::Ref(base), _) => Self::Place(quote!(#base.#field))
        }
    }

    /// Apply a run of non-collection hops.
    pub(crate) fn follow<'a, I>(self, segments: I) -> Self
    where
        I: IntoIterator<Item = &'a Segment>
    {
        segments.into_iter().fold(self, Self::step)
    }

    /// Iterator over the elements reached by a collection hop.
    pub(crate) fn fan_out(self, segment: &Segment) -> TokenStream {
        let field = field_ident(segment.name());
        let elements = match segment.hop() {
            Hop::Mapped => quote!(values),
            Hop::Field | Hop::Optional | Hop::Repeated => quote!(iter)
        };
        match self {
            Self::Place(base) | Self::Ref(base) => quote!(#base.#field.#elements()),
            Self::Maybe(base) => quote!(#base.into_iter().flat_map(|v| v.#field.#elements())),
        }
    }

    /// Bind the value to `name`, yielding the shape of the binding.
    ///
    /// Places are borrowed so the binding never moves out of the request.
    pub(crate) fn bind(self, name: &TokenStream) -> (TokenStream, Self) {
        match self {
            Self::Place(place) => (quote!(let #name = &#place;), Self::Ref(name.clone())),
            Self::Ref(reference) => (quote!(let #name = #reference;), Self::Ref(name.clone())),
            Self::Maybe(maybe) => (quote!(let #name = #maybe;), Self::Maybe(name.clone()))
        }
    }

    /// Statement running `then` with the present value, as a `Place` or
    /// `Ref`. Absent optional values skip it.
    pub(crate) fn present<F>(self, then: F) -> Option<TokenStream>
    where
        F: FnOnce(Self) -> Option<TokenStream>
    {
        match self {
            Self::Maybe(maybe) => {
                let body = then(Self::Ref(quote!(value)))?;
                Some(quote! {
                    if let Some(value) = #maybe {
                        #body
                    }
                })
            }
            value => then(value)
        }
    }

    /// Expression usable as a method receiver.
    pub(crate) fn receiver(&self) -> &TokenStream {
        match self {
            Self::Place(tokens) | Self::Ref(tokens) | Self::Maybe(tokens) => tokens
        }
    }

    /// Copy of a `Copy` value.
    pub(crate) fn copied(&self) -> TokenStream {
        match self {
            Self::Place(place) => place.clone(),
            Self::Ref(reference) => quote!(*#reference),
            Self::Maybe(maybe) => quote!(#maybe.copied().unwrap_or_default())
        }
    }
}

/// Guarded assignment of a key value to `target`.
///
/// The assignment only happens when the value is present and not zero: a
/// non-empty string, a non-zero integer or enum. This is the nil guard of a
/// tenant or id path.
pub(crate) fn guarded_assign(value: Value, kind: &Kind, target: &TokenStream) -> TokenStream {
    let is_string = matches!(kind, Kind::Scalar(Scalar::String));
    match value {
        Value::Maybe(maybe) => {
            let filter = if is_string {
                quote!(|value| !value.is_empty())
            } else {
                quote!(|value| **value != 0)
            };
            quote! {
                if let Some(value) = #maybe.filter(#filter) {
                    #target = value.to_string();
                }
            }
        }
        value => {
            let receiver = value.receiver().clone();
            let test = if is_string {
                quote!(!#receiver.is_empty())
            } else {
                let copied = value.copied();
                quote!(#copied != 0)
            };
            quote! {
                if #test {
                    #target = #receiver.to_string();
                }
            }
        }
    }
}

/// Unconditional string conversion of a key value.
pub(crate) fn stringify(value: &Value) -> TokenStream {
    match value {
        Value::Place(tokens) | Value::Ref(tokens) => quote!(#tokens.to_string()),
        Value::Maybe(maybe) => quote!(#maybe.map(ToString::to_string).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;

    fn compact(tokens: &TokenStream) -> String {
        tokens.to_string().split_whitespace().collect()
    }

    fn seg(field: FieldDef) -> Segment {
        Segment::traverse(&field)
    }

    #[test]
    fn place_steps() {
        let value = Value::Ref(quote!(request))
            .step(&seg(FieldDef::scalar("name", Scalar::String)));
        assert!(matches!(&value, Value::Place(_)));
        assert_eq!(compact(value.receiver()), "request.name");
    }

    #[test]
    fn optional_chain() {
        let value = Value::Ref(quote!(request))
            .step(&seg(FieldDef::message("meta", "acme.v1.Meta")))
            .step(&seg(FieldDef::message("owner", "acme.v1.Owner")))
            .step(&seg(FieldDef::scalar("name", Scalar::String)));
        assert!(matches!(&value, Value::Maybe(_)));
        assert_eq!(
            compact(value.receiver()),
            "request.meta.as_ref().and_then(|v|v.owner.as_ref()).map(|v|&v.name)"
        );
    }

    #[test]
    fn fan_out_shapes() {
        let list = seg(FieldDef::list("items", Kind::Message("acme.v1.Item".into())));
        let map = seg(FieldDef::map(
            "by_id",
            Scalar::String,
            Kind::Message("acme.v1.Item".into())
        ));
        assert_eq!(
            compact(&Value::Ref(quote!(request)).fan_out(&list)),
            "request.items.iter()"
        );
        assert_eq!(
            compact(&Value::Maybe(quote!(resource)).fan_out(&map)),
            "resource.into_iter().flat_map(|v|v.by_id.values())"
        );
    }

    #[test]
    fn binding_borrows_places() {
        let (stmt, bound) = Value::Place(quote!(request.doc)).bind(&quote!(resource));
        assert_eq!(compact(&stmt), "letresource=&request.doc;");
        assert!(matches!(bound, Value::Ref(_)));

        let (stmt, bound) = Value::Maybe(quote!(request.doc.as_ref())).bind(&quote!(resource));
        assert_eq!(compact(&stmt), "letresource=request.doc.as_ref();");
        assert!(matches!(bound, Value::Maybe(_)));
    }

    #[test]
    fn guards_by_kind_and_shape() {
        let target = quote!(tenant_id);
        let string = Kind::Scalar(Scalar::String);
        let integer = Kind::Scalar(Scalar::Int64);

        assert_eq!(
            compact(&guarded_assign(Value::Place(quote!(resource.tenant)), &string, &target)),
            "if!resource.tenant.is_empty(){tenant_id=resource.tenant.to_string();}"
        );
        assert_eq!(
            compact(&guarded_assign(Value::Ref(quote!(v1)), &integer, &target)),
            "if*v1!=0{tenant_id=v1.to_string();}"
        );
        assert_eq!(
            compact(&guarded_assign(Value::Maybe(quote!(m)), &string, &target)),
            "ifletSome(value)=m.filter(|value|!value.is_empty()){tenant_id=value.to_string();}"
        );
        assert_eq!(
            compact(&guarded_assign(Value::Maybe(quote!(m)), &integer, &target)),
            "ifletSome(value)=m.filter(|value|**value!=0){tenant_id=value.to_string();}"
        );
    }

    #[test]
    fn present_unwraps_maybe() {
        let stmt = Value::Maybe(quote!(m))
            .present(|value| {
                let receiver = value.receiver().clone();
                Some(quote!(use_it(#receiver);))
            })
            .unwrap();
        assert_eq!(compact(&stmt), "ifletSome(value)=m{use_it(value);}");

        let stmt = Value::Place(quote!(p)).present(|_| None);
        assert!(stmt.is_none());
    }
}
