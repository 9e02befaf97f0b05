//! The dataset proxy: a data source, a schema and a transformer.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::{debug, trace};
use veneer_common::error::{CommonError, Result};

use crate::dispatch::{Classification, classify};
use crate::each::Each;
use crate::forwarding::is_reserved;
use crate::kind::ProxyType;
use crate::schema::Schema;
use crate::source::DataSource;
use crate::transformer::Transformer;
use crate::value::Value;

/// A transparent wrapper around a shared data source.
///
/// The proxy never mutates itself. Forwarded operations hand back the proxy
/// itself, a new proxy around a new source, or a raw value (see
/// [`Forwarded`]). Two proxies are equal when their sources are equal;
/// schema and transformer do not take part.
pub struct DatasetProxy<S: DataSource, O> {
    kind: Arc<ProxyType<S, O>>,
    data: Arc<S>,
    schema: Schema,
    transformer: Transformer<S::Item, O>,
}

impl<S: DataSource, O> DatasetProxy<S, O> {
    /// Wrap `data` using the wrapper type's default transformer.
    pub fn new(kind: &Arc<ProxyType<S, O>>, data: impl Into<Arc<S>>, schema: Schema) -> Self {
        let transformer = kind.default_transformer().clone();
        Self::with_transformer(kind, data, schema, transformer)
    }

    /// Wrap `data` with an explicit transformer.
    ///
    /// `schema` is stored as given; it is not checked against `data`.
    pub fn with_transformer(
        kind: &Arc<ProxyType<S, O>>,
        data: impl Into<Arc<S>>,
        schema: Schema,
        transformer: Transformer<S::Item, O>,
    ) -> Self {
        trace!(
            proxy = %kind.name(),
            schema = %schema,
            transformer = transformer.name(),
            "Constructed proxy"
        );
        Self {
            kind: Arc::clone(kind),
            data: data.into(),
            schema,
            transformer,
        }
    }

    /// The wrapped data source.
    pub fn data(&self) -> &Arc<S> {
        &self.data
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn transformer(&self) -> &Transformer<S::Item, O> {
        &self.transformer
    }

    /// The wrapper type this proxy is an instance of.
    pub fn kind(&self) -> &Arc<ProxyType<S, O>> {
        &self.kind
    }

    /// The transformed elements as a lazy, restartable sequence.
    pub fn each(&self) -> Each<'_, S, O> {
        Each::new(self)
    }

    /// Pass every transformed element to `f`, in source order.
    pub fn each_with<F>(&self, f: F)
    where
        F: FnMut(O),
    {
        self.each().iter().for_each(f);
    }

    /// Collect the transformed elements.
    ///
    /// Does not return for an infinite source.
    pub fn to_vec(&self) -> Vec<O> {
        self.each().iter().collect()
    }

    /// Collect the transformed elements into a boxed slice.
    pub fn to_array(&self) -> Box<[O]> {
        self.each().iter().collect()
    }

    /// Invoke a forwarded operation on the data source.
    ///
    /// `operation` must be on the wrapper type's allow-list. Errors raised
    /// by the source are returned exactly as the source produced them.
    pub fn call(&self, operation: &str, args: &[Value]) -> Result<Forwarded<'_, S, O>> {
        if !self.kind.forwards(operation) {
            debug!(
                proxy = %self.kind.name(),
                operation,
                "Rejected call to an operation that is not forwarded"
            );
            return Err(CommonError::unsupported_operation(format!(
                "`{}` is not forwarded by {}",
                operation,
                self.kind.name()
            )));
        }

        let response = S::invoke(&self.data, operation, args)?;
        let classification = classify(&self.data, response);
        debug!(
            proxy = %self.kind.name(),
            operation,
            outcome = classification.label(),
            "Forwarded call"
        );
        Ok(self.resolve(classification))
    }

    /// Classify a response produced outside [`DatasetProxy::call`], such as
    /// by a typed method that invokes the source directly.
    pub fn adopt_response(&self, response: Value) -> Forwarded<'_, S, O> {
        self.resolve(classify(&self.data, response))
    }

    fn resolve(&self, classification: Classification<S>) -> Forwarded<'_, S, O> {
        match classification {
            Classification::Same => Forwarded::This(self),
            Classification::SameKind(data) => Forwarded::Rewrapped(self.rewrap(data)),
            Classification::Foreign(value) => Forwarded::Raw(value),
        }
    }

    /// A new proxy of the same wrapper type around `data`, keeping schema
    /// and transformer.
    pub fn rewrap(&self, data: impl Into<Arc<S>>) -> Self {
        Self {
            kind: Arc::clone(&self.kind),
            data: data.into(),
            schema: self.schema.clone(),
            transformer: self.transformer.clone(),
        }
    }

    /// A new proxy over the same source with a different schema.
    pub fn replace_schema(&self, schema: Schema) -> Self {
        Self {
            schema,
            ..self.clone()
        }
    }

    /// A new proxy over the same source with a different transformer.
    pub fn replace_transformer(&self, transformer: Transformer<S::Item, O>) -> Self {
        Self {
            transformer,
            ..self.clone()
        }
    }

    /// Whether this proxy is an instance of `kind`.
    pub fn is_a(&self, kind: &ProxyType<S, O>) -> bool {
        self.kind.id() == kind.id()
    }

    /// Whether `operation` can be called on this proxy, either as one of
    /// its own operations or as a forwarded one.
    pub fn responds_to(&self, operation: &str) -> bool {
        is_reserved(operation) || self.kind.forwards(operation)
    }
}

impl<S: DataSource, O> Clone for DatasetProxy<S, O> {
    fn clone(&self) -> Self {
        Self {
            kind: Arc::clone(&self.kind),
            data: Arc::clone(&self.data),
            schema: self.schema.clone(),
            transformer: self.transformer.clone(),
        }
    }
}

impl<S: DataSource + PartialEq, O> PartialEq for DatasetProxy<S, O> {
    fn eq(&self, other: &Self) -> bool {
        *self.data == *other.data
    }
}

impl<S: DataSource + Eq, O> Eq for DatasetProxy<S, O> {}

impl<S: DataSource + Hash, O> Hash for DatasetProxy<S, O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}

impl<S: DataSource + fmt::Debug, O> fmt::Debug for DatasetProxy<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.kind.name())
            .field("schema", &self.schema)
            .field("transformer", &self.transformer)
            .field("data", &self.data)
            .finish()
    }
}

/// The result of a forwarded call.
pub enum Forwarded<'a, S: DataSource, O> {
    /// The source returned itself; this is the proxy the call was made on.
    This(&'a DatasetProxy<S, O>),
    /// The source returned another source of its kind.
    Rewrapped(DatasetProxy<S, O>),
    /// Any other response, unmodified.
    Raw(Value),
}

impl<'a, S: DataSource, O> Forwarded<'a, S, O> {
    pub fn is_this(&self) -> bool {
        matches!(self, Forwarded::This(_))
    }

    pub fn is_rewrapped(&self) -> bool {
        matches!(self, Forwarded::Rewrapped(_))
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Forwarded::Raw(_))
    }

    /// The resulting proxy, if the response was a source.
    pub fn proxy(&self) -> Option<&DatasetProxy<S, O>> {
        match self {
            Forwarded::This(proxy) => Some(*proxy),
            Forwarded::Rewrapped(proxy) => Some(proxy),
            Forwarded::Raw(_) => None,
        }
    }

    /// Take the resulting proxy, cloning it when it is the receiver.
    pub fn into_proxy(self) -> Option<DatasetProxy<S, O>> {
        match self {
            Forwarded::This(proxy) => Some(proxy.clone()),
            Forwarded::Rewrapped(proxy) => Some(proxy),
            Forwarded::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&Value> {
        match self {
            Forwarded::Raw(value) => Some(value),
            _ => None,
        }
    }

    /// The raw response as a `T`, if it is one.
    pub fn raw_as<T: Any>(&self) -> Option<&T> {
        self.raw().and_then(Value::downcast_ref::<T>)
    }

    pub fn into_raw(self) -> Option<Value> {
        match self {
            Forwarded::Raw(value) => Some(value),
            _ => None,
        }
    }
}

impl<S: DataSource + fmt::Debug, O> fmt::Debug for Forwarded<'_, S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Forwarded::This(proxy) => f.debug_tuple("This").field(proxy).finish(),
            Forwarded::Rewrapped(proxy) => f.debug_tuple("Rewrapped").field(proxy).finish(),
            Forwarded::Raw(value) => f.debug_tuple("Raw").field(value).finish(),
        }
    }
}
