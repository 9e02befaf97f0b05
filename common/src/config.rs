//! Configuration records for declaring wrapper types.
//!
//! A wrapper type's forwarding allow-list can be written down as data and
//! loaded at startup instead of being spelled out in code.

use crate::error::{CommonError, Result};
use serde::{Deserialize, Serialize};

/// Declarative description of one concrete wrapper type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProxyConfig {
    /// Display name of the wrapper type, used in logs and `Debug` output.
    pub name: String,
    /// Operation names routed to the underlying data source.
    pub forward: Vec<String>,
}

impl ProxyConfig {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            forward: Vec::new(),
        }
    }

    /// Append operation names to the forward list.
    pub fn with_forward<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.forward.extend(names.into_iter().map(Into::<String>::into));
        self
    }

    /// Parse a configuration record from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            CommonError::deserialization_error_with_source("Invalid proxy configuration", e)
        })
    }

    /// Render this configuration record as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            CommonError::serialization_error_with_source("Cannot serialize proxy configuration", e)
        })
    }
}
