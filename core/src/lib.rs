//! Veneer Core - transparent dataset proxies
//!
//! A [`DatasetProxy`] wraps an arbitrary data source together with a schema
//! and an element transformer. Iteration yields transformed elements;
//! operations declared on the proxy's [`ProxyType`] are forwarded to the
//! source, and their responses are handed back as the proxy itself, a new
//! proxy of the same type, or the raw value, depending on what the source
//! returned.

pub mod dispatch;
pub mod each;
pub mod forwarding;
pub mod kind;
pub mod memory;
pub mod proxy;
pub mod schema;
pub mod source;
pub mod transformer;
pub mod value;

pub use dispatch::{Classification, classify};
pub use each::{Each, Elements};
pub use forwarding::{Forwarding, RESERVED_OPERATIONS, is_reserved};
pub use kind::{ProxyType, ProxyTypeBuilder};
pub use memory::{MemorySource, Predicate, predicate};
pub use proxy::{DatasetProxy, Forwarded};
pub use schema::Schema;
pub use source::DataSource;
pub use transformer::Transformer;
pub use value::{Value, argument};
pub use veneer_common::error::{CommonError, Result};
