// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generation options.
//!
//! Options arrive as the `protoc` plugin parameter, a comma-separated list of
//! `key=value` pairs:
//!
//! ```text
//! protoc --permit_out=gen --permit_opt=runtime_crate=crate::authz,file_suffix=.authz.rs
//! ```
//!
//! | Key | Default | Meaning |
//! |-----|---------|---------|
//! | `runtime_crate` | `::permit_core` | Path of the runtime crate in emitted code |
//! | `file_suffix` | `_permit.rs` | Output file name suffix |
//! | `annotations` | `permit.v1` | Protobuf package of the annotation extensions |

use thiserror::Error;

/// Default output file suffix.
pub const DEFAULT_FILE_SUFFIX: &str = "_permit.rs";

/// Default annotation package.
pub const DEFAULT_ANNOTATIONS: &str = "permit.v1";

/// Invalid plugin parameter.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Parameter key is not recognized.
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    /// Entry is not a `key=value` pair.
    #[error("malformed option `{0}`, expected `key=value`")]
    Malformed(String),

    /// Runtime crate is not a Rust path.
    #[error("runtime_crate `{value}` is not a Rust path: {source}")]
    InvalidRuntimeCrate {
        /// Rejected value.
        value:  String,
        /// Parser error.
        #[source]
        source: syn::Error
    },

    /// Option value is empty.
    #[error("option `{0}` needs a value")]
    EmptyValue(String)
}

/// Generation options.
#[derive(Debug, Clone)]
pub struct Config {
    runtime_crate: syn::Path,
    file_suffix:   String,
    annotations:   String
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime_crate: syn::parse_quote!(::permit_core),
            file_suffix:   DEFAULT_FILE_SUFFIX.to_owned(),
            annotations:   DEFAULT_ANNOTATIONS.to_owned()
        }
    }
}

impl Config {
    /// Parse a plugin parameter.
    ///
    /// An empty parameter yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown keys, entries without `=`, empty
    /// values and runtime crates that do not parse as a Rust path.
    ///
    /// # Example
    ///
    /// ```rust
    /// use permit_codegen::Config;
    ///
    /// let config = Config::from_parameter("file_suffix=.authz.rs").unwrap();
    /// assert_eq!(config.file_suffix(), ".authz.rs");
    /// assert!(Config::from_parameter("color=blue").is_err());
    /// ```
    pub fn from_parameter(parameter: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for entry in parameter.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::Malformed(entry.to_owned()))?;
            let (key, value) = (key.trim(), value.trim());
            if value.is_empty() {
                return Err(ConfigError::EmptyValue(key.to_owned()));
            }
            match key {
                "runtime_crate" => config = config.with_runtime_crate(value)?,
                "file_suffix" => config.file_suffix = value.to_owned(),
                "annotations" => {
                    config.annotations = value.trim_start_matches('.').to_owned();
                }
                _ => return Err(ConfigError::UnknownOption(key.to_owned()))
            }
        }
        Ok(config)
    }

    /// Replace the runtime crate path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRuntimeCrate`] when `path` is not a
    /// Rust path.
    pub fn with_runtime_crate(mut self, path: &str) -> Result<Self, ConfigError> {
        self.runtime_crate =
            syn::parse_str(path).map_err(|source| ConfigError::InvalidRuntimeCrate {
                value: path.to_owned(),
                source
            })?;
        Ok(self)
    }

    /// Replace the output file suffix.
    #[must_use]
    pub fn with_file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_suffix = suffix.into();
        self
    }

    /// Runtime crate path used in emitted code.
    #[must_use]
    pub const fn runtime_crate(&self) -> &syn::Path {
        &self.runtime_crate
    }

    /// Output file name suffix.
    #[must_use]
    pub fn file_suffix(&self) -> &str {
        &self.file_suffix
    }

    /// Protobuf package of the annotation extensions.
    #[must_use]
    pub fn annotations(&self) -> &str {
        &self.annotations
    }
}
