//! Data types shared by the resolver, the cache store and the sources.

use serde::Serialize;

/// Where a [`BookCandidate`] came from.
///
/// Variants are declared in priority order, which is also the order lookups are attempted in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Origin {
    /// The persistent title cache.
    Cache,
    /// The Open Library search API.
    OpenLibrary,
    /// The Google Books volumes API.
    GoogleBooks,
}

impl Origin {
    /// Display name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Origin::Cache => "cache",
            Origin::OpenLibrary => "openlibrary",
            Origin::GoogleBooks => "googlebooks",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An ISBN and author produced by one lookup path, not yet chosen as the answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookCandidate {
    /// The ISBN as reported by the origin, no normalization is applied.
    pub isbn: String,
    /// The first listed author, if the origin listed any.
    pub author: Option<String>,
    /// Which lookup path produced this candidate.
    pub origin: Origin,
}

impl BookCandidate {
    /// Creates a new candidate.
    pub fn new<S: Into<String>>(isbn: S, author: Option<String>, origin: Origin) -> Self {
        Self {
            isbn: isbn.into(),
            author,
            origin,
        }
    }
}

/// A title to ISBN mapping held by the cache store.
///
/// Serializes to the stored document shape `{ title, canonicalIsbn, author? }`. `author` is an
/// optional attribute of the collection and is left out of the document when it is unknown.
/// Titles are stored verbatim and the store does not enforce uniqueness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CacheRecord {
    /// Lookup key, exactly as it was requested.
    pub title: String,
    /// The canonical ISBN for the title.
    #[serde(rename = "canonicalIsbn")]
    pub isbn: String,
    /// Author of the winning candidate when the record was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl CacheRecord {
    /// Record for persisting the winning `candidate` of `title`.
    #[must_use]
    pub fn from_candidate(title: &str, candidate: &BookCandidate) -> Self {
        Self {
            title: title.to_owned(),
            isbn: candidate.isbn.clone(),
            author: candidate.author.clone(),
        }
    }

    /// Converts the record into a candidate with an origin of [`Origin::Cache`].
    #[must_use]
    pub fn into_candidate(self) -> BookCandidate {
        BookCandidate {
            isbn: self.isbn,
            author: self.author,
            origin: Origin::Cache,
        }
    }
}

/// The outcome of asking a single source about a title.
///
/// [`Lookup::Absent`] and [`Lookup::Failed`] are treated the same by the resolver, they are kept
/// apart so callers can tell "no ISBN available" from "source unreachable".
#[derive(Debug)]
pub enum Lookup {
    /// The source produced a candidate.
    Present(BookCandidate),
    /// The source answered but had no usable ISBN.
    Absent,
    /// The source could not be queried or its answer could not be read.
    Failed(crate::Error),
}

impl Lookup {
    /// Takes the candidate, if any.
    #[must_use]
    pub fn candidate(self) -> Option<BookCandidate> {
        match self {
            Lookup::Present(candidate) => Some(candidate),
            Lookup::Absent | Lookup::Failed(_) => None,
        }
    }
}

impl From<Result<Option<BookCandidate>, crate::Error>> for Lookup {
    fn from(res: Result<Option<BookCandidate>, crate::Error>) -> Self {
        match res {
            Ok(Some(candidate)) => Lookup::Present(candidate),
            Ok(None) => Lookup::Absent,
            Err(err) => Lookup::Failed(err),
        }
    }
}
