use log::{debug, error, info, trace, warn};

use crate::{
    model::{BookCandidate, CacheRecord, Lookup},
    select::most_plausible,
    source::Source,
    store::CacheStore,
    Error, ErrorKind,
};

/// Resolves a title to a canonical ISBN, consulting the cache before any source.
///
/// Every step degrades instead of failing: an unreachable cache is treated as a miss, a failing
/// source contributes no candidate and a failed write-back is only logged. The only error a
/// resolution returns is [`ErrorKind::NotFound`].
pub struct Resolver {
    cache: Box<dyn CacheStore>,
    sources: Vec<Box<dyn Source>>,
}

impl Resolver {
    /// Creates a resolver which asks `sources` in the given order on a cache miss.
    ///
    /// The order is also the tie-break order used when picking between candidates.
    pub fn new<S>(cache: S, sources: Vec<Box<dyn Source>>) -> Self
    where
        S: CacheStore + 'static,
    {
        if sources.is_empty() {
            warn!("No sources configured - only cached titles can be resolved");
        }
        Self {
            cache: Box::new(cache),
            sources,
        }
    }

    /// Resolves `title` to an ISBN and author.
    ///
    /// The title is used verbatim as both the cache key and the search term.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::NotFound`] error is returned when neither the cache nor any source has an
    /// ISBN for the title.
    pub fn resolve(&self, title: &str) -> Result<BookCandidate, Error> {
        trace!("Resolving title '{title}'");

        match self.cache.find(title) {
            Ok(Some(record)) => {
                info!("Cache hit for '{title}'");
                return Ok(record.into_candidate());
            }
            Ok(None) => debug!("Cache miss for '{title}'"),
            Err(err) => error!("Cache lookup for '{title}' failed, treating as a miss: {err}"),
        }

        let candidates = self.candidates(title);
        let winner = most_plausible(candidates).ok_or_else(|| {
            Error::new(
                ErrorKind::NotFound,
                format!("No ISBN found for the title '{title}'"),
            )
        })?;

        info!(
            "Resolved '{title}' to '{}' using {}",
            winner.isbn, winner.origin
        );

        if let Err(err) = self
            .cache
            .insert(&CacheRecord::from_candidate(title, &winner))
        {
            error!("Failed to write '{title}' to the cache: {err}");
        }

        Ok(winner)
    }

    fn candidates(&self, title: &str) -> Vec<BookCandidate> {
        self.sources
            .iter()
            .filter_map(|source| match source.search(title) {
                Lookup::Present(candidate) => {
                    debug!(
                        "{} found '{}' for '{title}'",
                        source.origin(),
                        candidate.isbn
                    );
                    Some(candidate)
                }
                Lookup::Absent => {
                    debug!("{} has no ISBN for '{title}'", source.origin());
                    None
                }
                Lookup::Failed(err) => {
                    error!("{} lookup for '{title}' failed: {err}", source.origin());
                    None
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let origins: Vec<_> = self.sources.iter().map(|source| source.origin()).collect();
        f.debug_struct("Resolver")
            .field("sources", &origins)
            .finish_non_exhaustive()
    }
}
