//! Lazy traversal of a proxy's transformed elements.

use tracing::trace;

use crate::proxy::DatasetProxy;
use crate::source::DataSource;
use crate::transformer::Transformer;

/// A restartable, lazy sequence of transformed elements.
///
/// Every call to [`Each::iter`] (or every `for` loop over an `&Each`) starts
/// a fresh traversal of the underlying source. Nothing is materialized; the
/// source decides ordering and termination.
pub struct Each<'a, S: DataSource, O> {
    proxy: &'a DatasetProxy<S, O>,
}

impl<'a, S: DataSource, O> Each<'a, S, O> {
    pub(crate) fn new(proxy: &'a DatasetProxy<S, O>) -> Self {
        Self { proxy }
    }

    /// Start a new traversal.
    pub fn iter(&self) -> Elements<'a, S, O> {
        trace!(proxy = %self.proxy.kind().name(), "Starting traversal");
        Elements {
            inner: self.proxy.data().elements(),
            transformer: self.proxy.transformer(),
        }
    }
}

impl<S: DataSource, O> Clone for Each<'_, S, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: DataSource, O> Copy for Each<'_, S, O> {}

impl<'a, S: DataSource, O> IntoIterator for Each<'a, S, O> {
    type Item = O;
    type IntoIter = Elements<'a, S, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, S: DataSource, O> IntoIterator for &Each<'a, S, O> {
    type Item = O;
    type IntoIter = Elements<'a, S, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One traversal of an [`Each`] sequence.
pub struct Elements<'a, S: DataSource, O> {
    inner: Box<dyn Iterator<Item = S::Item> + 'a>,
    transformer: &'a Transformer<S::Item, O>,
}

impl<S: DataSource, O> Iterator for Elements<'_, S, O> {
    type Item = O;

    fn next(&mut self) -> Option<O> {
        self.inner
            .next()
            .map(|element| self.transformer.apply(element))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
