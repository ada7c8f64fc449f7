use crate::{model::CacheRecord, Error};

/// Persistent title to ISBN mapping consulted before any source.
///
/// Lookup and insert are separate calls with nothing tying them together, two resolutions of the
/// same uncached title may both insert a record.
pub trait CacheStore: Send + Sync {
    /// Returns the first record whose title equals `title`.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the store cannot be reached or its answer cannot be read.
    fn find(&self, title: &str) -> Result<Option<CacheRecord>, Error>;

    /// Creates a new record, existing records with the same title are left as they are.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the store cannot be reached or rejects the record.
    fn insert(&self, record: &CacheRecord) -> Result<(), Error>;
}
