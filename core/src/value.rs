//! Dynamically typed values passed across the forwarding boundary.
//!
//! Forwarded operations take their arguments and return their responses as
//! [`Value`]s, so one dispatcher can serve every operation name. A value
//! remembers the address of the allocation it wraps, which is what the
//! dispatcher compares when it checks whether a source returned itself.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use veneer_common::error::{CommonError, Result};

/// A shared, type-erased value.
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Value {
    /// Wrap an owned value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Wrap an already shared value without reallocating it.
    ///
    /// Data sources must use this (not [`Value::new`]) when they hand back a
    /// source, otherwise the response is a fresh `Arc<Arc<T>>` and neither
    /// the identity check nor the same-kind check can see through it.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Name of the concrete type held by this value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Recover the shared allocation as a concrete `Arc<T>`.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }

    /// Clone the held value out, if it is a `T`.
    pub fn get<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    /// Whether this value wraps exactly the allocation behind `other`.
    pub fn is_same_ref<T: ?Sized>(&self, other: &Arc<T>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(other))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value<{}>", self.type_name)
    }
}

/// Fetch the `index`-th argument of a forwarded `operation` as a `T`.
pub fn argument<'a, T: Any>(args: &'a [Value], index: usize, operation: &str) -> Result<&'a T> {
    let value = args.get(index).ok_or_else(|| {
        CommonError::argument_error(format!(
            "`{}` expects an argument at position {}, got {} argument(s)",
            operation,
            index,
            args.len()
        ))
    })?;
    value.downcast_ref::<T>().ok_or_else(|| {
        CommonError::argument_error(format!(
            "`{}` argument {} must be {}, got {}",
            operation,
            index,
            std::any::type_name::<T>(),
            value.type_name()
        ))
    })
}
