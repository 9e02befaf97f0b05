//! The contract a wrapped data source must fulfil.

use std::any::Any;
use std::sync::Arc;

use veneer_common::error::Result;

use crate::value::Value;

/// An underlying collection, cursor or query object that a
/// [`DatasetProxy`](crate::proxy::DatasetProxy) can wrap.
///
/// Sources are shared by `Arc` and never copied by the proxy. Equality of
/// proxies is the source's own `PartialEq`.
pub trait DataSource: Any + Send + Sync {
    /// The raw element type yielded by iteration.
    type Item: 'static;

    /// Iterate the source from the beginning.
    ///
    /// Every call starts a new traversal, which is what makes
    /// [`DatasetProxy::each`](crate::proxy::DatasetProxy::each) restartable.
    /// The sequence may be infinite.
    fn elements(&self) -> Box<dyn Iterator<Item = Self::Item> + '_>;

    /// Run the named operation against `this`.
    ///
    /// An operation that hands back the receiver should return
    /// `Value::from_arc(Arc::clone(this))`; one that produces a new source
    /// should return it through [`Value::from_arc`] or [`Value::new`].
    fn invoke(this: &Arc<Self>, operation: &str, args: &[Value]) -> Result<Value>
    where
        Self: Sized;

    /// View `response` as a source of the same kind as `Self`.
    ///
    /// The default accepts only `Self` itself. Families of source types in
    /// which one type refines another override this to accept (and convert)
    /// the refinements; anything they do not recognise stays `None` and is
    /// passed through to the caller untouched.
    fn adopt(response: &Value) -> Option<Arc<Self>>
    where
        Self: Sized,
    {
        response.downcast_arc::<Self>()
    }
}
