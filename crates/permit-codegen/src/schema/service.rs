// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Services, methods and files.

use super::MessageRef;

/// Combination mode of a bulk check, as annotated on a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BulkCheckMode {
    /// Every check must pass.
    #[default]
    AllOf,

    /// At least one check must pass.
    AnyOf
}

/// One RPC method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    /// Method name.
    pub name: String,

    /// Request message.
    pub input: MessageRef,

    /// Method needs no authorization.
    pub public: bool,

    /// Permission (or action) checked for the call.
    pub permission: Option<String>,

    /// Combination mode for bulk checks.
    pub bulk_check_mode: Option<BulkCheckMode>
}

impl MethodDef {
    /// Create a method with no annotations.
    pub fn new(name: impl Into<String>, input: impl Into<MessageRef>) -> Self {
        Self {
            name:            name.into(),
            input:           input.into(),
            public:          false,
            permission:      None,
            bulk_check_mode: None
        }
    }

    /// Mark as public.
    #[must_use]
    pub fn public(mut self) -> Self {
        self.public = true;
        self
    }

    /// Set the checked permission.
    #[must_use]
    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Set the bulk combination mode.
    #[must_use]
    pub fn bulk_check_mode(mut self, mode: BulkCheckMode) -> Self {
        self.bulk_check_mode = Some(mode);
        self
    }
}

/// One service, methods in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDef {
    /// Service name.
    pub name: String,

    /// Methods in declaration order.
    pub methods: Vec<MethodDef>
}

impl ServiceDef {
    /// Create a service with no methods.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:    name.into(),
            methods: Vec::new()
        }
    }

    /// Append a method.
    #[must_use]
    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }
}

/// One schema file to generate code for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDef {
    /// Path of the file as passed to the compiler, e.g. `acme/v1/docs.proto`.
    pub name: String,

    /// Protobuf package.
    pub package: String,

    /// Services in declaration order.
    pub services: Vec<ServiceDef>
}

impl FileDef {
    /// Create a file with no services.
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name:     name.into(),
            package:  package.into(),
            services: Vec::new()
        }
    }

    /// Append a service.
    #[must_use]
    pub fn service(mut self, service: ServiceDef) -> Self {
        self.services.push(service);
        self
    }
}
