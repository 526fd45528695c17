// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Annotated schema the conformance checks are generated from.
//!
//! Mirrors the message structs of the crate root. Shared with the build
//! script, which generates `conformance/v1/checks_permit.rs` from it.

use permit_codegen::schema::{
    BulkCheckMode, FieldDef, FileDef, Kind, MessageDef, MessageRef, MethodDef, Scalar, Schema,
    ServiceDef
};

/// Protobuf package of every fixture message.
pub const PACKAGE: &str = "conformance.v1";

/// Schema file holding the services.
pub const FILE: &str = "conformance/v1/checks.proto";

fn reference(name: &str) -> MessageRef {
    MessageRef::new(format!("{PACKAGE}.{name}"))
}

fn message(name: &str) -> MessageDef {
    MessageDef::new(PACKAGE, name)
}

fn list_of(name: &str, message: &str) -> FieldDef {
    FieldDef::list(name, Kind::Message(reference(message)))
}

fn single(name: &str, message: &str) -> FieldDef {
    FieldDef::message(name, reference(message).as_str())
}

/// Every fixture message.
pub fn messages() -> Vec<MessageDef> {
    vec![
        message("Document")
            .resource_type("document")
            .field(FieldDef::scalar("id", Scalar::String).resource_id())
            .field(FieldDef::scalar("tenant", Scalar::String).tenant_id())
            .field(FieldDef::scalar("owner", Scalar::String).attribute("owner")),
        message("GetDocumentRequest").field(single("resource", "Document")),
        message("PublicDocumentRequest").field(single("resource", "Document")),
        message("HealthRequest"),
        message("Item")
            .resource_type("item")
            .field(FieldDef::scalar("name", Scalar::String)),
        message("ProcessItemsRequest").field(list_of("items", "Item")),
        message("Owner").field(FieldDef::scalar("tenant", Scalar::String).tenant_id()),
        message("Folder")
            .resource_type("folder")
            .field(FieldDef::scalar("id", Scalar::UInt64).resource_id())
            .field(single("owner", "Owner")),
        message("FolderGroup").field(FieldDef::map(
            "by_name",
            Scalar::String,
            Kind::Message(reference("Folder"))
        )),
        message("MoveFoldersRequest").field(list_of("groups", "FolderGroup")),
        message("Batch")
            .resource_type("batch")
            .field(FieldDef::list("ids", Kind::Scalar(Scalar::String)).resource_id()),
        message("PurgeRequest").field(single("batch", "Batch")),
        message("Book").field(FieldDef::scalar("title", Scalar::String).attribute("titles")),
        message("Section")
            .field(FieldDef::scalar("name", Scalar::String).attribute("section_names"))
            .field(list_of("books", "Book")),
        message("Library")
            .resource_type("library")
            .field(FieldDef::scalar("id", Scalar::String).resource_id())
            .field(list_of("sections", "Section")),
        message("GetLibraryRequest").field(single("library", "Library")),
        message("Report")
            .resource_type("report")
            .field(FieldDef::scalar("id", Scalar::Int64).resource_id())
            .field(FieldDef::enumeration("status", format!("{PACKAGE}.Status")).attribute("status"))
            .field(FieldDef::scalar("archived", Scalar::Bool).attribute("archived"))
            .field(FieldDef::scalar("score", Scalar::Double).attribute("score"))
            .field(FieldDef::scalar("quota", Scalar::UInt32).attribute("quota"))
            .field(FieldDef::scalar("owner", Scalar::String).optional().attribute("owner"))
            .field(
                FieldDef::map("labels", Scalar::String, Kind::Scalar(Scalar::String))
                    .attribute("labels")
            )
            .field(FieldDef::scalar("payload", Scalar::Bytes).attribute("payload"))
            .field(FieldDef::list("tags", Kind::Scalar(Scalar::String)).attribute("tags")),
        message("TicketMeta")
            .field(FieldDef::scalar("key", Scalar::String).resource_id())
            .field(FieldDef::scalar("tenant", Scalar::String).tenant_id()),
        message("Ticket")
            .resource_type("ticket")
            .field(single("meta", "TicketMeta").optional()),
        message("CloseTicketRequest").field(single("ticket", "Ticket")),
        message("Bulk"),
        message("Request")
            .nested_in(["Bulk"])
            .field(list_of("reports", "Report")),
    ]
}

/// The schema file with every fixture service.
pub fn file() -> FileDef {
    FileDef::new(FILE, PACKAGE)
        .service(
            ServiceDef::new("Documents")
                .method(MethodDef::new("Get", reference("GetDocumentRequest")).permission("read"))
                .method(MethodDef::new("Fetch", reference("GetDocumentRequest")).permission("read"))
                .method(MethodDef::new("Peek", reference("PublicDocumentRequest")).public())
                .method(MethodDef::new("Health", reference("HealthRequest")).public())
        )
        .service(
            ServiceDef::new("Items").method(
                MethodDef::new("Process", reference("ProcessItemsRequest")).permission("bulk_process")
            )
        )
        .service(
            ServiceDef::new("Folders").method(
                MethodDef::new("Move", reference("MoveFoldersRequest"))
                    .permission("move")
                    .bulk_check_mode(BulkCheckMode::AnyOf)
            )
        )
        .service(
            ServiceDef::new("Batches")
                .method(MethodDef::new("Purge", reference("PurgeRequest")).permission("purge"))
        )
        .service(
            ServiceDef::new("Libraries").method(
                MethodDef::new("Get", reference("GetLibraryRequest")).permission("read_library")
            )
        )
        .service(
            ServiceDef::new("Tickets")
                .method(MethodDef::new("Close", reference("CloseTicketRequest")).permission("close"))
        )
        .service(
            ServiceDef::new("Reports")
                .method(MethodDef::new("View", reference("Report")).permission("view"))
                .method(MethodDef::new("BulkView", reference("Bulk.Request")).permission("view"))
        )
}

/// Complete fixture schema.
pub fn schema() -> Schema {
    let mut schema = Schema::new();
    for message in messages() {
        schema.add_message(message);
    }
    schema.add_file(file());
    schema
}
