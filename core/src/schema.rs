//! Ordered field names describing the shape of one logical element.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An immutable, ordered list of field names.
///
/// Clones share the same allocation, so carrying a schema over to a
/// rewrapped proxy never copies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Arc<[String]>,
}

impl Schema {
    pub fn new<I, N>(fields: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::<String>::into).collect(),
        }
    }

    /// A schema with no fields.
    pub fn empty() -> Self {
        Self::new(Vec::<String>::new())
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of `name` in the schema, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Whether both schemas share the same allocation.
    pub fn ptr_eq(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::empty()
    }
}

impl<N: Into<String>> FromIterator<N> for Schema {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.fields.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let schema = Schema::new(["id", "name", "score"]);
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.index_of("name"), Some(1));
        assert_eq!(schema.index_of("missing"), None);
        assert!(schema.contains("score"));
        assert_eq!(schema.iter().collect::<Vec<_>>(), vec!["id", "name", "score"]);
    }

    #[test]
    fn test_clone_shares_fields() {
        let schema: Schema = ["n"].into_iter().collect();
        let copy = schema.clone();
        assert!(schema.ptr_eq(&copy));
        assert!(!schema.ptr_eq(&Schema::new(["n"])));
        assert_eq!(schema, Schema::new(["n"]));
    }

    #[test]
    fn test_display_and_serde() {
        let schema = Schema::new(["a", "b"]);
        assert_eq!(schema.to_string(), "(a, b)");
        assert_eq!(Schema::empty().to_string(), "()");

        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
        assert_eq!(serde_json::from_str::<Schema>(&json).unwrap(), schema);
    }
}
