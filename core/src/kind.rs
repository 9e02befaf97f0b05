//! Descriptors for concrete wrapper types.
//!
//! A [`ProxyType`] plays the role of a wrapper class: it owns the default
//! transformer every instance starts with and the list of operations its
//! instances forward. Descriptors are built once, shared by `Arc`, and
//! carried over whenever a proxy is rewrapped, so a rewrapped proxy is
//! always of the same wrapper type as the proxy it came from.

use std::fmt;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;
use veneer_common::config::ProxyConfig;
use veneer_common::error::Result;

use crate::forwarding::Forwarding;
use crate::source::DataSource;
use crate::transformer::Transformer;

/// The name given to wrapper types that are built without one.
pub const DEFAULT_PROXY_NAME: &str = "DatasetProxy";

/// A concrete wrapper type over sources of type `S` yielding `O`.
pub struct ProxyType<S: DataSource, O> {
    id: Uuid,
    name: String,
    transformer: Transformer<S::Item, O>,
    forwarding: Forwarding,
}

impl<S: DataSource> ProxyType<S, S::Item> {
    /// Start declaring a wrapper type whose default transformer is the
    /// identity.
    pub fn builder<N: Into<String>>(name: N) -> ProxyTypeBuilder<S, S::Item> {
        ProxyTypeBuilder::new().name(name)
    }

    /// Declare a wrapper type from a configuration record.
    pub fn from_config(config: ProxyConfig) -> Result<Arc<Self>> {
        ProxyTypeBuilder::new().config(config).build()
    }
}

impl<S: DataSource, O> ProxyType<S, O> {
    /// Unique identity of this wrapper type.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The transformer instances get when none is given at construction.
    pub fn default_transformer(&self) -> &Transformer<S::Item, O> {
        &self.transformer
    }

    pub fn forwarding(&self) -> &Forwarding {
        &self.forwarding
    }

    /// Whether instances of this type forward `operation` to their source.
    pub fn forwards(&self, operation: &str) -> bool {
        self.forwarding.is_forwarded(operation)
    }
}

impl<S: DataSource, O> fmt::Debug for ProxyType<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyType")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("transformer", &self.transformer)
            .field("forwarding", &self.forwarding)
            .finish()
    }
}

/// Builder for [`ProxyType`] descriptors.
pub struct ProxyTypeBuilder<S: DataSource, O> {
    config: ProxyConfig,
    transformer: Transformer<S::Item, O>,
}

impl<S: DataSource> ProxyTypeBuilder<S, S::Item> {
    /// Create a builder with the identity transformer and no forwards.
    pub fn new() -> Self {
        Self {
            config: ProxyConfig::new(DEFAULT_PROXY_NAME),
            transformer: Transformer::identity(),
        }
    }
}

impl<S: DataSource> Default for ProxyTypeBuilder<S, S::Item> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DataSource, O> ProxyTypeBuilder<S, O> {
    /// Set the wrapper type's name.
    pub fn name<N: Into<String>>(mut self, name: N) -> Self {
        self.config.name = name.into();
        self
    }

    /// Add operation names to forward to the source.
    pub fn forward<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.config.forward.extend(names.into_iter().map(Into::<String>::into));
        self
    }

    /// Take name and forwards from a configuration record, replacing any
    /// set so far.
    pub fn config(mut self, config: ProxyConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default transformer of the wrapper type.
    pub fn transformer<P>(self, transformer: Transformer<S::Item, P>) -> ProxyTypeBuilder<S, P> {
        ProxyTypeBuilder {
            config: self.config,
            transformer,
        }
    }

    /// Validate the forward list and build the descriptor.
    ///
    /// Fails with a configuration error if any forwarded name is empty or
    /// reserved by the proxy.
    pub fn build(self) -> Result<Arc<ProxyType<S, O>>> {
        let forwarding = Forwarding::new().declare(&self.config.forward)?;
        let kind = ProxyType {
            id: Uuid::new_v4(),
            name: self.config.name,
            transformer: self.transformer,
            forwarding,
        };
        debug!(
            proxy = %kind.name,
            id = %kind.id,
            forwarded = kind.forwarding.len(),
            "Declared proxy type"
        );
        Ok(Arc::new(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;
    use veneer_common::error::CommonError;

    type Numbers = MemorySource<i64>;

    #[test]
    fn test_builder_defaults() {
        let kind = ProxyTypeBuilder::<Numbers, i64>::new().build().unwrap();
        assert_eq!(kind.name(), DEFAULT_PROXY_NAME);
        assert!(kind.forwarding().is_empty());
        assert_eq!(kind.default_transformer().apply(5), 5);
    }

    #[test]
    fn test_builder_with_transformer() {
        let kind = ProxyType::<Numbers, i64>::builder("Labels")
            .forward(["count"])
            .transformer(Transformer::named("label", |n: i64| format!("#{}", n)))
            .build()
            .unwrap();
        assert_eq!(kind.name(), "Labels");
        assert!(kind.forwards("count"));
        assert!(!kind.forwards("filter"));
        assert_eq!(kind.default_transformer().apply(3), "#3");
    }

    #[test]
    fn test_reserved_forward_fails_build() {
        let err = ProxyType::<Numbers, i64>::builder("Broken")
            .forward(["filter", "each"])
            .build()
            .unwrap_err();
        assert!(matches!(err, CommonError::ConfigurationError { .. }));
    }

    #[test]
    fn test_from_config() {
        let config = ProxyConfig::from_json(r#"{"name": "Loaded", "forward": ["take"]}"#).unwrap();
        let kind = ProxyType::<Numbers, i64>::from_config(config).unwrap();
        assert_eq!(kind.name(), "Loaded");
        assert!(kind.forwards("take"));
    }

    #[test]
    fn test_each_build_has_fresh_identity() {
        let a = ProxyType::<Numbers, i64>::builder("A").build().unwrap();
        let b = ProxyType::<Numbers, i64>::builder("A").build().unwrap();
        assert_ne!(a.id(), b.id());
    }
}
