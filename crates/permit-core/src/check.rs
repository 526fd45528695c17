// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Authorization check records.

use crate::{AttributeValue, Attributes, DEFAULT_TENANT};

/// One authorization request: may `tenant_id` perform `permission` on
/// `resource`?
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Check {
    /// Owning tenant, [`DEFAULT_TENANT`] when the request carries none.
    pub tenant_id: String,

    /// Permission or action name from the RPC annotation.
    pub permission: String,

    /// Resource the permission applies to.
    pub resource: Resource
}

impl Check {
    /// Create a check.
    pub fn new(
        tenant_id: impl Into<String>,
        permission: impl Into<String>,
        resource: Resource
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            permission: permission.into(),
            resource
        }
    }

    /// Check if the tenant fell back to [`DEFAULT_TENANT`].
    pub fn has_default_tenant(&self) -> bool {
        self.tenant_id == DEFAULT_TENANT
    }
}

/// A concrete resource instance found in a request.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    /// Resource type label from the `resource_type` annotation.
    pub resource_type: String,

    /// Identifier, empty when the resource has none.
    pub id: String,

    /// Named contextual attributes.
    pub attributes: Attributes
}

impl Resource {
    /// Create a resource without attributes.
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id:            id.into(),
            attributes:    Attributes::new()
        }
    }

    /// Add an attribute, replacing any previous value under `name`.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tenant_detected() {
        let check = Check::new(DEFAULT_TENANT, "read", Resource::new("Document", "d1"));
        assert!(check.has_default_tenant());

        let check = Check::new("acme", "read", Resource::new("Document", "d1"));
        assert!(!check.has_default_tenant());
    }

    #[test]
    fn with_attribute_replaces() {
        let resource = Resource::new("Document", "d1")
            .with_attribute("owner", AttributeValue::from("alice"))
            .with_attribute("owner", AttributeValue::from("bob"));
        assert_eq!(resource.attributes.len(), 1);
        assert_eq!(resource.attribute("owner"), Some(&AttributeValue::from("bob")));
    }

    #[test]
    fn missing_attribute_is_none() {
        let resource = Resource::new("Document", "");
        assert!(resource.attribute("owner").is_none());
        assert!(resource.id.is_empty());
    }
}
