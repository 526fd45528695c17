// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use super::*;
use crate::{
    diagnostic::Diagnostics,
    discover::discover,
    schema::{FieldDef, Kind, MessageDef, Scalar, Schema}
};

const PKG: &str = "acme.v1";

fn full(name: &str) -> String {
    format!("{PKG}.{name}")
}

fn msg_kind(name: &str) -> Kind {
    Kind::Message(full(name).as_str().into())
}

fn schema(messages: impl IntoIterator<Item = MessageDef>) -> Schema {
    let mut schema = Schema::new();
    for message in messages {
        schema.add_message(message);
    }
    schema
}

fn runtime() -> syn::Path {
    syn::parse_quote!(rt)
}

fn compact(tokens: &TokenStream) -> String {
    tokens.to_string().split_whitespace().collect()
}

/// Emit the gated body of `request` and return it compacted.
fn gated(schema: &Schema, request: &str, mode: Option<BulkCheckMode>) -> String {
    let mut diagnostics = Diagnostics::new();
    let resource = discover(schema, &full(request).as_str().into(), &mut diagnostics).unwrap();
    let rt = runtime();
    let mut names = NameContext::new();
    let body = Emitter::new(&rt, &mut names).gated(&resource, "read", mode);

    let item = get_checks_impl(&rt, &quote!(Request), &body);
    assert!(syn::parse2::<syn::File>(item).is_ok(), "emitted code must parse");
    compact(&body)
}

fn document() -> MessageDef {
    MessageDef::new(PKG, "Document")
        .resource_type("document")
        .field(FieldDef::scalar("id", Scalar::String).resource_id())
        .field(FieldDef::scalar("tenant", Scalar::String).tenant_id())
}

#[test]
fn public_body() {
    let rt = runtime();
    let mut names = NameContext::new();
    let body = Emitter::new(&rt, &mut names).public();
    assert_eq!(
        compact(&body),
        "rt::CheckConfig{kind:rt::CheckKind::Public,mode:None,checks:Vec::new()}"
    );
    assert_eq!(names.issued(), 0);
}

#[test]
fn single_resource_with_guarded_id_and_tenant() {
    let schema = schema([
        document(),
        MessageDef::new(PKG, "Request").field(FieldDef::message("document", &full("Document")))
    ]);
    let code = gated(&schema, "Request", None);

    assert!(code.starts_with(
        "letrequest=self;letpermission=\"read\";letmutchecks:Vec<rt::Check>=Vec::new();"
    ));
    assert!(code.contains("letresource=request.document.as_ref();"));
    assert!(code.contains(
        "letmutid=String::new();ifletSome(value)=resource.map(|v|&v.id).filter(|value|!value.is_empty()){id=value.to_string();}"
    ));
    assert!(code.contains(
        "letmuttenant_id=String::from(rt::DEFAULT_TENANT);ifletSome(value)=resource.map(|v|&v.tenant).filter(|value|!value.is_empty()){tenant_id=value.to_string();}"
    ));
    assert!(code.contains("letattributes=rt::Attributes::new();"));
    assert!(code.contains(
        "checks.push(rt::Check{tenant_id,permission:String::from(permission),resource:rt::Resource{resource_type:String::from(\"document\"),id,attributes}});"
    ));
    assert!(code.ends_with("rt::CheckConfig{kind,mode:None,checks}"));
    assert!(!code.contains("for"));
}

#[test]
fn request_itself_is_the_resource() {
    let schema = schema([document()]);
    let code = gated(&schema, "Document", None);
    assert!(code.contains("letresource=request;"));
    assert!(code.contains("if!resource.id.is_empty(){id=resource.id.to_string();}"));
}

#[test]
fn count_only_loop_without_keys() {
    let item = MessageDef::new(PKG, "Item").resource_type("item");
    let schema = schema([
        item,
        MessageDef::new(PKG, "Request").field(FieldDef::list("items", msg_kind("Item")))
    ]);
    let code = gated(&schema, "Request", None);

    assert!(code.contains("for_inrequest.items.iter(){letid=String::new();"));
    assert!(code.contains("lettenant_id=String::from(rt::DEFAULT_TENANT);"));
    assert!(!code.contains("letresource"));
    assert!(code.contains("mode:Some(rt::BulkCheckMode::AllOf)"));
}

#[test]
fn count_only_loop_before_singular_hops() {
    let item = MessageDef::new(PKG, "Item").resource_type("item");
    let schema = schema([
        item,
        MessageDef::new(PKG, "Wrapper").field(FieldDef::message("item", &full("Item"))),
        MessageDef::new(PKG, "Group").field(FieldDef::list("wrappers", msg_kind("Wrapper"))),
        MessageDef::new(PKG, "Request").field(FieldDef::list("groups", msg_kind("Group")))
    ]);
    let code = gated(&schema, "Request", None);

    assert!(code.contains("forv1inrequest.groups.iter(){for_inv1.wrappers.iter(){letid=String::new();"));
    assert!(!code.contains("v2"));
}

#[test]
fn nested_collections_bind_distinct_variables() {
    let schema = schema([
        document(),
        MessageDef::new(PKG, "Folder").field(FieldDef::map(
            "documents",
            Scalar::String,
            msg_kind("Document")
        )),
        MessageDef::new(PKG, "Request").field(FieldDef::list("folders", msg_kind("Folder")))
    ]);
    let code = gated(&schema, "Request", Some(BulkCheckMode::AnyOf));

    assert!(code.contains(
        "forv1inrequest.folders.iter(){forv2inv1.documents.values(){letresource=v2;"
    ));
    assert!(code.contains("mode:Some(rt::BulkCheckMode::AnyOf)"));
}

#[test]
fn loop_through_optional_wrapper() {
    let schema = schema([
        document(),
        MessageDef::new(PKG, "Batch").field(FieldDef::list("documents", msg_kind("Document"))),
        MessageDef::new(PKG, "Request").field(FieldDef::message("batch", &full("Batch")))
    ]);
    let code = gated(&schema, "Request", None);
    assert!(code.contains(
        "forv1inrequest.batch.as_ref().into_iter().flat_map(|v|v.documents.iter()){letresource=v1;"
    ));
}

#[test]
fn list_ids_yield_one_check_each() {
    let doc = MessageDef::new(PKG, "Document")
        .resource_type("document")
        .field(FieldDef::list("ids", Kind::Scalar(Scalar::Int64)).resource_id());
    let schema = schema([
        doc,
        MessageDef::new(PKG, "Request").field(FieldDef::message("document", &full("Document")))
    ]);
    let code = gated(&schema, "Request", None);

    assert!(code.contains(
        "letresource=request.document.as_ref();forv1inresource.into_iter().flat_map(|v|v.ids.iter()){letid=v1.to_string();"
    ));
    assert!(code.contains("mode:Some(rt::BulkCheckMode::AllOf)"));
}

#[test]
fn integer_id_on_reference() {
    let doc = MessageDef::new(PKG, "Document")
        .resource_type("document")
        .field(FieldDef::scalar("id", Scalar::UInt32).resource_id());
    let schema = schema([
        doc,
        MessageDef::new(PKG, "Request").field(FieldDef::list("documents", msg_kind("Document")))
    ]);
    let code = gated(&schema, "Request", None);
    assert!(code.contains("forv1inrequest.documents.iter(){letresource=v1;"));
    assert!(code.contains("ifresource.id!=0{id=resource.id.to_string();}"));
}

#[test]
fn invalid_id_degrades_to_empty_id() {
    let doc = MessageDef::new(PKG, "Document")
        .resource_type("document")
        .field(FieldDef::scalar("id", Scalar::Bool).resource_id());
    let schema = schema([doc]);
    let code = gated(&schema, "Document", None);
    assert!(code.contains("letid=String::new();"));
    assert!(!code.contains("letresource"));
}

#[test]
fn attributes_are_sorted_and_flattened() {
    let member = MessageDef::new(PKG, "Member")
        .field(FieldDef::scalar("name", Scalar::String).attribute("members"));
    let group = MessageDef::new(PKG, "Group").field(FieldDef::list("members", msg_kind("Member")));
    let doc = MessageDef::new(PKG, "Document")
        .resource_type("document")
        .field(FieldDef::scalar("level", Scalar::Int32).attribute("level"))
        .field(FieldDef::list("groups", msg_kind("Group")))
        .field(FieldDef::scalar("owner", Scalar::String).optional().attribute("owner"));
    let schema = schema([member, group, doc]);
    let code = gated(&schema, "Document", None);

    let level = code
        .find("attributes.insert(String::from(\"level\")")
        .unwrap();
    let members = code.find("String::from(\"members\")").unwrap();
    let owner = code.find("String::from(\"owner\")").unwrap();
    assert!(level < members && members < owner);

    assert!(code.contains("letmutattributes=rt::Attributes::new();"));
    assert!(code.contains(
        "attributes.insert(String::from(\"level\"),rt::AttributeValue::Int(i64::from(resource.level)));"
    ));
    assert!(code.contains(
        "{letmutvalues:Vec<rt::AttributeValue>=Vec::new();forv1inresource.groups.iter(){forv2inv1.members.iter(){values.push(rt::AttributeValue::String(v2.name.clone()));}}if!values.is_empty(){attributes.insert(String::from(\"members\"),rt::AttributeValue::List(values));}}"
    ));
    assert!(code.contains(
        "ifletSome(value)=resource.owner.as_ref(){attributes.insert(String::from(\"owner\"),rt::AttributeValue::String(value.clone()));}"
    ));
    assert!(code.contains("mode:None"));
}

#[test]
fn message_attributes_are_skipped() {
    let meta = MessageDef::new(PKG, "Meta");
    let doc = MessageDef::new(PKG, "Document")
        .resource_type("document")
        .field(FieldDef::message("meta", &full("Meta")).attribute("meta"));
    let schema = schema([meta, doc]);
    let code = gated(&schema, "Document", None);
    assert!(code.contains("letattributes=rt::Attributes::new();"));
    assert!(!code.contains("\"meta\""));
}

#[test]
fn loop_names_continue_across_methods() {
    let schema = schema([
        document(),
        MessageDef::new(PKG, "Request").field(FieldDef::list("documents", msg_kind("Document")))
    ]);
    let mut diagnostics = Diagnostics::new();
    let resource = discover(&schema, &full("Request").as_str().into(), &mut diagnostics).unwrap();
    let rt = runtime();
    let mut names = NameContext::new();
    let first = compact(&Emitter::new(&rt, &mut names).gated(&resource, "read", None));
    let second = compact(&Emitter::new(&rt, &mut names).gated(&resource, "write", None));

    assert!(first.contains("forv1in"));
    assert!(second.contains("forv2in"));
    assert_eq!(names.issued(), 2);
}

#[test]
fn impl_block_shape() {
    let rt = runtime();
    let item = get_checks_impl(&rt, &quote!(folder::Entry), &quote!(todo!()));
    assert_eq!(
        compact(&item),
        "#[allow(unused_variables,unused_mut,clippy::all)]implrt::GetChecksforfolder::Entry{fnget_checks(&self)->rt::CheckConfig{todo!()}}"
    );
}
