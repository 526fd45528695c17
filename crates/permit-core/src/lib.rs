// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime types for protoc-gen-permit generated code.
//!
//! Every request message of an annotated RPC gets a generated
//! [`GetChecks`] implementation. Calling it on a live request value yields a
//! [`CheckConfig`]: the list of authorization [`Check`]s an interceptor has to
//! submit before the call proceeds.
//!
//! # Overview
//!
//! - [`GetChecks`]: Implemented by generated code for request messages
//! - [`CheckConfig`]: Result of [`GetChecks::get_checks`]
//! - [`Check`] / [`Resource`]: One authorization request
//! - [`AttributeValue`]: Contextual attribute values of a resource
//! - [`prelude`]: Convenient re-exports
//!
//! # Usage
//!
//! ```rust,ignore
//! use permit_core::prelude::*;
//!
//! let config = request.get_checks();
//! match config.kind {
//!     CheckKind::Public => {}
//!     CheckKind::Single => authorize(&config.checks[0])?,
//!     CheckKind::Bulk => authorize_all(&config.checks, config.mode)?
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod attribute;
mod check;
pub mod prelude;

pub use attribute::{AttributeValue, Attributes};
pub use check::{Check, Resource};

/// Tenant assigned to a check when the request carries no tenant value.
pub const DEFAULT_TENANT: &str = "default";

/// How a request is authorized.
///
/// `Single` and `Bulk` are decided at run time from the number of checks
/// collected for the request value, not at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckKind {
    /// No authorization required.
    Public,

    /// Zero or one check collected.
    Single,

    /// More than one check collected.
    Bulk
}

impl CheckKind {
    /// Derive the kind from a collected check count.
    ///
    /// # Example
    ///
    /// ```rust
    /// use permit_core::CheckKind;
    ///
    /// assert_eq!(CheckKind::for_count(1), CheckKind::Single);
    /// assert_eq!(CheckKind::for_count(3), CheckKind::Bulk);
    /// ```
    pub const fn for_count(count: usize) -> Self {
        if count > 1 { Self::Bulk } else { Self::Single }
    }

    /// Check if no authorization is required.
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }
}

/// How the results of a bulk check are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BulkCheckMode {
    /// Every check must pass.
    #[default]
    AllOf,

    /// At least one check must pass.
    AnyOf
}

impl BulkCheckMode {
    /// Combine individual check outcomes.
    ///
    /// An empty outcome list never authorizes.
    pub fn combine<I>(&self, outcomes: I) -> bool
    where
        I: IntoIterator<Item = bool>
    {
        let mut outcomes = outcomes.into_iter().peekable();
        if outcomes.peek().is_none() {
            return false;
        }
        match self {
            Self::AllOf => outcomes.all(|allowed| allowed),
            Self::AnyOf => outcomes.any(|allowed| allowed)
        }
    }
}

/// Authorization requirements computed for one request value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckConfig {
    /// Public, single or bulk.
    pub kind: CheckKind,

    /// Combination mode, present when the resource sits behind a collection.
    pub mode: Option<BulkCheckMode>,

    /// Checks in request traversal order.
    pub checks: Vec<Check>
}

impl CheckConfig {
    /// Configuration of a method that needs no authorization.
    pub const fn public() -> Self {
        Self {
            kind:   CheckKind::Public,
            mode:   None,
            checks: Vec::new()
        }
    }

    /// Check if the method is public.
    pub const fn is_public(&self) -> bool {
        self.kind.is_public()
    }

    /// Combination mode to use, falling back to [`BulkCheckMode::AllOf`].
    pub fn mode_or_default(&self) -> BulkCheckMode {
        self.mode.unwrap_or_default()
    }
}

/// Computes the authorization checks for a request message.
///
/// Implemented by generated code, one impl per annotated request type.
///
/// # Example
///
/// ```rust
/// use permit_core::{CheckConfig, GetChecks};
///
/// struct HealthRequest;
///
/// impl GetChecks for HealthRequest {
///     fn get_checks(&self) -> CheckConfig {
///         CheckConfig::public()
///     }
/// }
///
/// assert!(HealthRequest.get_checks().is_public());
/// ```
pub trait GetChecks {
    /// Collect the checks required to authorize a call with `self` as
    /// payload.
    fn get_checks(&self) -> CheckConfig;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_for_count() {
        assert_eq!(CheckKind::for_count(0), CheckKind::Single);
        assert_eq!(CheckKind::for_count(1), CheckKind::Single);
        assert_eq!(CheckKind::for_count(2), CheckKind::Bulk);
    }

    #[test]
    fn public_config_is_empty() {
        let config = CheckConfig::public();
        assert!(config.is_public());
        assert!(config.checks.is_empty());
        assert!(config.mode.is_none());
    }

    #[test]
    fn mode_defaults_to_all_of() {
        let config = CheckConfig {
            kind:   CheckKind::Single,
            mode:   None,
            checks: Vec::new()
        };
        assert_eq!(config.mode_or_default(), BulkCheckMode::AllOf);
    }

    #[test]
    fn all_of_requires_every_outcome() {
        assert!(BulkCheckMode::AllOf.combine([true, true]));
        assert!(!BulkCheckMode::AllOf.combine([true, false]));
    }

    #[test]
    fn any_of_requires_one_outcome() {
        assert!(BulkCheckMode::AnyOf.combine([false, true]));
        assert!(!BulkCheckMode::AnyOf.combine([false, false]));
    }

    #[test]
    fn empty_outcomes_never_authorize() {
        assert!(!BulkCheckMode::AllOf.combine([]));
        assert!(!BulkCheckMode::AnyOf.combine([]));
    }
}
