//! Common stub sources and helpers for integration tests

#![allow(dead_code)] // each test binary uses a different subset

use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use veneer_core::{
    CommonError, DataSource, DatasetProxy, ProxyType, Result, Schema, Transformer, Value, argument,
};

/// Initialise a test subscriber so `RUST_LOG` works when debugging a test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// An ordered sequence of integers.
///
/// `filter` returns a new sequence, `count` an integer, `to_set` a foreign
/// collection, `touch` the sequence itself, and `explode` fails.
#[derive(Debug, Clone)]
pub struct Sequence {
    items: Vec<i64>,
    /// How many traversals have been started.
    reads: Arc<AtomicUsize>,
}

impl Sequence {
    pub fn new(items: Vec<i64>) -> Self {
        Self {
            items,
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

// Equality and hashing ignore the read counter.
impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for Sequence {}

impl Hash for Sequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl DataSource for Sequence {
    type Item = i64;

    fn elements(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Box::new(self.items.iter().copied())
    }

    fn invoke(this: &Arc<Self>, operation: &str, args: &[Value]) -> Result<Value> {
        match operation {
            "filter" => {
                let keep = argument::<fn(i64) -> bool>(args, 0, operation)?;
                let items = this.items.iter().copied().filter(|n| keep(*n)).collect();
                Ok(Value::new(Sequence::new(items)))
            }
            "count" => Ok(Value::new(this.items.len())),
            "to_set" => Ok(Value::new(
                this.items
                    .iter()
                    .copied()
                    .collect::<std::collections::BTreeSet<i64>>(),
            )),
            "touch" => Ok(Value::from_arc(Arc::clone(this))),
            "explode" => Err(CommonError::source_error("sequence exploded")),
            _ => Err(CommonError::unsupported_operation(format!(
                "unknown operation `{}`",
                operation
            ))),
        }
    }
}

/// A cursor whose `batch_size` setter mutates it in place and returns it.
#[derive(Debug)]
pub struct Cursor {
    rows: Vec<i64>,
    batch_size: AtomicUsize,
}

impl Cursor {
    pub fn new(rows: Vec<i64>) -> Self {
        Self {
            rows,
            batch_size: AtomicUsize::new(100),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.load(Ordering::SeqCst)
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl DataSource for Cursor {
    type Item = i64;

    fn elements(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(self.rows.iter().copied())
    }

    fn invoke(this: &Arc<Self>, operation: &str, args: &[Value]) -> Result<Value> {
        match operation {
            "batch_size" => {
                let size = *argument::<usize>(args, 0, operation)?;
                this.batch_size.store(size, Ordering::SeqCst);
                Ok(Value::from_arc(Arc::clone(this)))
            }
            "limit" => {
                let n = *argument::<usize>(args, 0, operation)?;
                Ok(Value::new(Cursor::new(
                    this.rows.iter().copied().take(n).collect(),
                )))
            }
            _ => Err(CommonError::unsupported_operation(format!(
                "unknown operation `{}`",
                operation
            ))),
        }
    }
}

/// Rows of `(name, score)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Rows {
    pub rows: Vec<(String, i64)>,
}

/// A refinement of [`Rows`] known to be sorted by score.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedRows {
    pub rows: Vec<(String, i64)>,
}

impl DataSource for Rows {
    type Item = (String, i64);

    fn elements(&self) -> Box<dyn Iterator<Item = (String, i64)> + '_> {
        Box::new(self.rows.iter().cloned())
    }

    fn invoke(this: &Arc<Self>, operation: &str, _args: &[Value]) -> Result<Value> {
        match operation {
            "sort_by_score" => {
                let mut rows = this.rows.clone();
                rows.sort_by_key(|(_, score)| *score);
                Ok(Value::new(SortedRows { rows }))
            }
            "raw_rows" => Ok(Value::new(this.rows.clone())),
            _ => Err(CommonError::unsupported_operation(format!(
                "unknown operation `{}`",
                operation
            ))),
        }
    }

    fn adopt(response: &Value) -> Option<Arc<Self>> {
        if let Some(rows) = response.downcast_arc::<Rows>() {
            return Some(rows);
        }
        response.downcast_ref::<SortedRows>().map(|sorted| {
            Arc::new(Rows {
                rows: sorted.rows.clone(),
            })
        })
    }
}

/// The natural numbers, without end.
#[derive(Debug, PartialEq)]
pub struct Naturals;

impl DataSource for Naturals {
    type Item = u64;

    fn elements(&self) -> Box<dyn Iterator<Item = u64> + '_> {
        Box::new(0..)
    }

    fn invoke(_this: &Arc<Self>, operation: &str, _args: &[Value]) -> Result<Value> {
        Err(CommonError::unsupported_operation(format!(
            "unknown operation `{}`",
            operation
        )))
    }
}

/// The wrapper type used by the end-to-end scenario: doubles every element.
pub fn doubled_sequences() -> Arc<ProxyType<Sequence, i64>> {
    ProxyType::<Sequence, i64>::builder("DoubledSequence")
        .forward(["filter", "count", "to_set", "touch", "explode"])
        .transformer(Transformer::named("double", |n: i64| n * 2))
        .build()
        .expect("valid proxy type")
}

pub fn create_test_sequence(items: Vec<i64>) -> DatasetProxy<Sequence, i64> {
    DatasetProxy::new(&doubled_sequences(), Sequence::new(items), Schema::new(["n"]))
}

pub fn even(n: i64) -> bool {
    n % 2 == 0
}

/// A `filter` argument for [`Sequence`].
pub fn sequence_predicate(f: fn(i64) -> bool) -> Value {
    Value::new(f)
}
