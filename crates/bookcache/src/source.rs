use crate::model::{Lookup, Origin};

/// An external bibliographic API that can be searched by title.
///
/// Implementations decode the remote payload at their own boundary and only ever hand back a
/// [`Lookup`], errors included.
pub trait Source: Send + Sync {
    /// The origin stamped onto candidates from this source.
    fn origin(&self) -> Origin;

    /// Searches for `title` and takes the ISBN and author of the first result.
    fn search(&self, title: &str) -> Lookup;
}
