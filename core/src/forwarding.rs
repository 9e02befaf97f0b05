//! The allow-list of operations a wrapper type forwards to its source.

use std::collections::BTreeSet;

use tracing::warn;
use veneer_common::error::{CommonError, Result};

/// Operations the proxy implements itself. Forwarding any of them would
/// bypass the transformer or break type introspection.
pub const RESERVED_OPERATIONS: &[&str] = &[
    "each",
    "iter",
    "into_iter",
    "to_list",
    "to_vec",
    "to_a",
    "to_array",
    "is_a",
    "kind_of",
    "instance_of",
    "responds_to",
    "type_id",
];

/// Canonical spelling of an operation name for reserved-name checks.
fn normalize(name: &str) -> String {
    name.trim_end_matches('?').replace('-', "_")
}

/// Whether `name` is one of the proxy's own operations.
///
/// `to-list`, `is_a?` and `to_list` all name the same reserved operation.
pub fn is_reserved(name: &str) -> bool {
    let name = normalize(name);
    RESERVED_OPERATIONS.contains(&name.as_str())
}

/// A validated set of forwarded operation names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forwarding {
    names: BTreeSet<String>,
}

impl Forwarding {
    /// An allow-list that forwards nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `names` to the allow-list.
    ///
    /// Fails without modifying anything if any name is empty or reserved.
    /// Declaring a name twice is harmless.
    pub fn declare<I, N>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut accepted = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                warn!("Rejected empty forwarded operation name");
                return Err(CommonError::configuration_error(
                    "forwarded operation names must not be empty",
                ));
            }
            if is_reserved(name) {
                warn!(operation = name, "Rejected forward of reserved operation");
                return Err(CommonError::configuration_error(format!(
                    "`{}` is reserved by the proxy and cannot be forwarded",
                    name
                )));
            }
            accepted.push(name.to_string());
        }
        self.names.extend(accepted);
        Ok(self)
    }

    pub fn is_forwarded(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Forwarded names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
