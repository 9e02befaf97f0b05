//! Classification of forwarded responses.
//!
//! Every forwarded operation ends here: the runtime identity and type of the
//! response decide whether the caller gets the proxy back, a new proxy
//! around a new source, or the raw response.

use std::sync::Arc;

use crate::source::DataSource;
use crate::value::Value;

/// How a forwarded response relates to the source it was produced from.
#[derive(Debug)]
pub enum Classification<S> {
    /// The response is the very source the operation was invoked on.
    Same,
    /// The response is another source of the same kind.
    SameKind(Arc<S>),
    /// Anything else: counts, flags, extracted elements, foreign collections.
    Foreign(Value),
}

/// Classify `response` against the `data` it was produced from.
///
/// The identity check runs first and compares allocations, so a source
/// that returns itself is recognised even when its type would also pass
/// the same-kind check. Responses [`DataSource::adopt`] cannot place are
/// foreign.
pub fn classify<S: DataSource>(data: &Arc<S>, response: Value) -> Classification<S> {
    if response.is_same_ref(data) {
        return Classification::Same;
    }
    match S::adopt(&response) {
        Some(source) if Arc::ptr_eq(&source, data) => Classification::Same,
        Some(source) => Classification::SameKind(source),
        None => Classification::Foreign(response),
    }
}

impl<S> Classification<S> {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Same => "identity",
            Classification::SameKind(_) => "rewrap",
            Classification::Foreign(_) => "passthrough",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;

    #[test]
    fn test_same_reference() {
        let data = Arc::new(MemorySource::new(vec![1, 2, 3]));
        let response = Value::from_arc(Arc::clone(&data));
        assert!(matches!(classify(&data, response), Classification::Same));
    }

    #[test]
    fn test_equal_but_distinct_source_is_rewrapped() {
        let data = Arc::new(MemorySource::new(vec![1, 2, 3]));
        let response = Value::new(MemorySource::new(vec![1, 2, 3]));
        match classify(&data, response) {
            Classification::SameKind(source) => {
                assert!(!Arc::ptr_eq(&source, &data));
                assert_eq!(*source, *data);
            }
            other => panic!("expected rewrap, got {}", other.label()),
        }
    }

    #[test]
    fn test_foreign_types_pass_through() {
        let data = Arc::new(MemorySource::new(vec![1, 2, 3]));

        let count = classify(&data, Value::new(3usize));
        assert_eq!(count.label(), "passthrough");

        // A plain Vec holds the same elements but is not a source.
        let vec = classify(&data, Value::new(vec![1, 2, 3]));
        assert!(matches!(vec, Classification::Foreign(v) if v.is::<Vec<i32>>()));

        // A source over a different element type is a different kind.
        let other = classify(&data, Value::new(MemorySource::new(vec!["a"])));
        assert!(matches!(other, Classification::Foreign(_)));
    }
}
