//! Element transformers applied during iteration.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A shared pure function from one raw element to one output element.
///
/// Cloning a transformer shares the function; it is never mutated.
pub struct Transformer<I, O> {
    name: Cow<'static, str>,
    func: Arc<dyn Fn(I) -> O + Send + Sync>,
}

impl<I, O> Transformer<I, O> {
    /// Create an anonymous transformer.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Self::named("anonymous", func)
    }

    /// Create a transformer with a name shown in `Debug` output and logs.
    pub fn named<N, F>(name: N, func: F) -> Self
    where
        N: Into<Cow<'static, str>>,
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transform a single element.
    #[inline]
    pub fn apply(&self, element: I) -> O {
        (self.func)(element)
    }

    /// Whether both transformers share the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }

    /// Compose `self` with `next`, applying `self` first.
    pub fn then<P>(&self, next: Transformer<O, P>) -> Transformer<I, P>
    where
        I: 'static,
        O: 'static,
        P: 'static,
    {
        let first = Arc::clone(&self.func);
        let name = format!("{} | {}", self.name, next.name);
        Transformer::named(name, move |element| next.apply(first(element)))
    }
}

impl<I: 'static> Transformer<I, I> {
    /// The transformer that returns every element unchanged.
    pub fn identity() -> Self {
        Self::named("identity", |element| element)
    }
}

impl<I, O> Clone for Transformer<I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<I, O> fmt::Debug for Transformer<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transformer").field(&self.name).finish()
    }
}
