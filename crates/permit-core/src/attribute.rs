// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resource attribute values.
//!
//! Generated code converts protobuf field values into [`AttributeValue`]
//! according to the field kind known at generation time:
//!
//! | Protobuf kind | Variant |
//! |---------------|---------|
//! | `bool` | [`AttributeValue::Bool`] |
//! | signed integers, enums | [`AttributeValue::Int`] |
//! | unsigned integers | [`AttributeValue::UInt`] |
//! | `float`, `double` | [`AttributeValue::Float`] |
//! | `string` | [`AttributeValue::String`] |
//! | `bytes` | [`AttributeValue::Bytes`] |
//! | `repeated T` | [`AttributeValue::List`] |
//! | `map<K, V>` | [`AttributeValue::Map`] |
//!
//! Values collected across nested collections are flattened into a single
//! [`AttributeValue::List`].

use std::collections::BTreeMap;

/// Attribute map of a resource, ordered by name.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttributeValue {
    /// Boolean value.
    Bool(bool),
    /// Signed integer or enum number.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Repeated values.
    List(Vec<AttributeValue>),
    /// Map values keyed by the stringified map key.
    Map(BTreeMap<String, AttributeValue>)
}

impl AttributeValue {
    /// Get the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None
        }
    }

    /// Get the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(items: Vec<AttributeValue>) -> Self {
        Self::List(items)
    }
}
