// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use permit_core::prelude::*;
//! ```

pub use crate::{
    AttributeValue, Attributes, BulkCheckMode, Check, CheckConfig, CheckKind, DEFAULT_TENANT,
    GetChecks, Resource
};
