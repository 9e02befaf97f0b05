//! An in-memory ordered data source.

use std::sync::Arc;

use veneer_common::error::{CommonError, Result};

use crate::source::DataSource;
use crate::value::{Value, argument};

/// Predicate argument accepted by `filter`.
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Wrap a closure as a `filter` argument.
pub fn predicate<T, F>(f: F) -> Value
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    let predicate: Predicate<T> = Arc::new(f);
    Value::new(predicate)
}

/// An ordered, immutable sequence of elements held in memory.
///
/// Supported operations:
///
/// | operation      | arguments           | response                  |
/// |----------------|---------------------|---------------------------|
/// | `count`, `len` |                     | `usize`                   |
/// | `is_empty`     |                     | `bool`                    |
/// | `first`/`last` |                     | `Option<T>`               |
/// | `get`          | `usize`             | `Option<T>`               |
/// | `filter`       | [`Predicate<T>`]    | new source                |
/// | `take`         | `usize`             | new source, or itself     |
/// | `skip`         | `usize`             | new source, or itself     |
/// | `reverse`      |                     | new source                |
/// | `concat`       | `MemorySource<T>`   | new source                |
///
/// `take` with a count covering every element and `skip(0)` return the
/// receiver itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MemorySource<T> {
    items: Vec<T>,
}

impl<T> MemorySource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> FromIterator<T> for MemorySource<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> From<Vec<T>> for MemorySource<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> DataSource for MemorySource<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Item = T;

    fn elements(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(self.items.iter().cloned())
    }

    fn invoke(this: &Arc<Self>, operation: &str, args: &[Value]) -> Result<Value> {
        let items = &this.items;
        match operation {
            "count" | "len" => Ok(Value::new(items.len())),
            "is_empty" => Ok(Value::new(items.is_empty())),
            "first" => Ok(Value::new(items.first().cloned())),
            "last" => Ok(Value::new(items.last().cloned())),
            "get" => {
                let index = *argument::<usize>(args, 0, operation)?;
                Ok(Value::new(items.get(index).cloned()))
            }
            "filter" => {
                let keep = argument::<Predicate<T>>(args, 0, operation)?;
                let kept: Self = items.iter().filter(|item| keep(*item)).cloned().collect();
                Ok(Value::new(kept))
            }
            "take" => {
                let n = *argument::<usize>(args, 0, operation)?;
                if n >= items.len() {
                    return Ok(Value::from_arc(Arc::clone(this)));
                }
                Ok(Value::new(Self::new(items[..n].to_vec())))
            }
            "skip" => {
                let n = *argument::<usize>(args, 0, operation)?;
                if n == 0 {
                    return Ok(Value::from_arc(Arc::clone(this)));
                }
                Ok(Value::new(Self::new(
                    items.iter().skip(n).cloned().collect(),
                )))
            }
            "reverse" => Ok(Value::new(Self::new(
                items.iter().rev().cloned().collect(),
            ))),
            "concat" => {
                let other = argument::<Self>(args, 0, operation)?;
                let joined: Self = items.iter().chain(other.items.iter()).cloned().collect();
                Ok(Value::new(joined))
            }
            _ => Err(CommonError::unsupported_operation(format!(
                "unknown operation `{}` for MemorySource",
                operation
            ))),
        }
    }
}
