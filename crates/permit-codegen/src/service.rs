// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Service assembly.

use crate::{
    diagnostic::Diagnostics,
    method::Method,
    schema::{Schema, ServiceDef}
};

/// A service with its resolved methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    /// Service name.
    pub name: String,

    /// Methods in declaration order.
    pub methods: Vec<Method>
}

impl Service {
    /// Resolve every method of a service definition.
    pub fn resolve(schema: &Schema, def: &ServiceDef, diagnostics: &mut Diagnostics) -> Self {
        let methods = def
            .methods
            .iter()
            .map(|method| Method::resolve(schema, &def.name, method, diagnostics))
            .collect();
        Self {
            name: def.name.clone(),
            methods
        }
    }
}
