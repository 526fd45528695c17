// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Conformance suite for generated checks.
//!
//! The message structs below have the shapes prost generates for the
//! [`fixture`] schema: singular messages as `Option<M>`, `optional` scalars
//! as `Option<T>`, repeated fields as `Vec<T>`, maps as `HashMap<K, V>` and
//! enums as `i32`. The build script generates the `GetChecks` impls for them,
//! which are included at the bottom of this file.

use std::collections::HashMap;

pub mod fixture;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub id:     String,
    pub tenant: String,
    pub owner:  String
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetDocumentRequest {
    pub resource: Option<Document>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PublicDocumentRequest {
    pub resource: Option<Document>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HealthRequest {}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    pub name: String
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcessItemsRequest {
    pub items: Vec<Item>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Owner {
    pub tenant: String
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Folder {
    pub id:    u64,
    pub owner: Option<Owner>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FolderGroup {
    pub by_name: HashMap<String, Folder>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoveFoldersRequest {
    pub groups: Vec<FolderGroup>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Batch {
    pub ids: Vec<String>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PurgeRequest {
    pub batch: Option<Batch>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Book {
    pub title: String
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    pub name:  String,
    pub books: Vec<Book>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Library {
    pub id:       String,
    pub sections: Vec<Section>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetLibraryRequest {
    pub library: Option<Library>
}

/// Report lifecycle, stored as `i32` on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Status {
    Unspecified = 0,
    Open = 1,
    Closed = 2
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub id:       i64,
    pub status:   i32,
    pub archived: bool,
    pub score:    f64,
    pub quota:    u32,
    pub owner:    Option<String>,
    pub labels:   HashMap<String, String>,
    pub payload:  Vec<u8>,
    pub tags:     Vec<String>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TicketMeta {
    pub key:    String,
    pub tenant: String
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ticket {
    pub meta: Option<TicketMeta>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CloseTicketRequest {
    pub ticket: Option<Ticket>
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bulk {}

pub mod bulk {
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct Request {
        pub reports: Vec<super::Report>
    }
}

include!(concat!(env!("OUT_DIR"), "/conformance/v1/checks_permit.rs"));
