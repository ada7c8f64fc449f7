use log::{info, trace};
use serde::Deserialize;

use crate::{
    model::{BookCandidate, Lookup, Origin},
    source::Source,
    Error,
};

use super::{url_with_params, Client};

const OPEN_LIBRARY_URL: &str = "https://openlibrary.org/search.json";

/// Title search against the Open Library search API.
#[derive(Default)]
pub struct OpenLibrary<C: Client = reqwest::blocking::Client> {
    client: C,
    base_url: Option<String>,
}

impl<C: Client> OpenLibrary<C> {
    /// Creates a source using the public Open Library endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: C::default(),
            base_url: None,
        }
    }

    /// Points the source at a different search endpoint, e.g. a mirror.
    #[must_use]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(OPEN_LIBRARY_URL)
    }

    pub(crate) fn get_candidate(&self, title: &str) -> Result<Option<BookCandidate>, Error> {
        info!("Searching for title '{title}' using Open Library API");
        let url = url_with_params(self.base_url(), [("title", title)])?;

        let SearchModel { docs } = self.client.get_json(url, &[])?;
        trace!("Request was successful");

        Ok(docs.into_iter().next().and_then(Doc::build))
    }
}

impl<C: Client + Send + Sync> Source for OpenLibrary<C> {
    fn origin(&self) -> Origin {
        Origin::OpenLibrary
    }

    fn search(&self, title: &str) -> Lookup {
        self.get_candidate(title).into()
    }
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct SearchModel {
    #[serde(default)]
    docs: Vec<Doc>,
}

/// A single search result, only the fields used for a candidate are decoded.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Doc {
    #[serde(default)]
    isbn: Vec<String>,
    #[serde(default)]
    author_name: Vec<String>,
}

impl Doc {
    fn build(self) -> Option<BookCandidate> {
        let Doc { isbn, author_name } = self;
        let isbn = isbn.into_iter().find(|isbn| !isbn.is_empty())?;
        let author = author_name.into_iter().find(|author| !author.is_empty());
        Some(BookCandidate::new(isbn, author, Origin::OpenLibrary))
    }
}

#[cfg(test)]
mod tests {
    use super::{OpenLibrary, SearchModel};
    use crate::{
        api::{assert_url, impl_text_producer, MockClient, NetworkErrorProducer},
        model::{Lookup, Origin},
        source::Source,
        ErrorKind,
    };

    const OPEN_LIBRARY_JSON: &str = include_str!("../../tests/data/open_library_search.json");

    impl_text_producer! {
        ValidJsonProducer => Ok(OPEN_LIBRARY_JSON.to_owned()),
        EmptyDocsProducer => Ok(r#"{ "numFound": 0, "docs": [] }"#.to_owned()),
        NoIsbnProducer => Ok(
            r#"{
                "docs": [{ "title": "The Hobbit", "author_name": ["J.R.R. Tolkien"] }]
            }"#.to_owned()
        ),
        NoAuthorProducer => Ok(r#"{ "docs": [{ "isbn": ["9780441013593"] }] }"#.to_owned()),
        MalformedProducer => Ok(r#"{ "docs": "nope" }"#.to_owned()),
    }

    #[test]
    fn title_url_format_is_correct() {
        let source = OpenLibrary::<MockClient<EmptyDocsProducer>>::new();
        drop(source.search("The Hobbit"));
        assert_url!("https://openlibrary.org/search.json?title=The+Hobbit");
    }

    #[test]
    fn base_url_can_be_overridden() {
        let source = OpenLibrary::<MockClient<EmptyDocsProducer>>::new()
            .with_base_url("http://localhost:9000/search.json");
        drop(source.search("Dune"));
        assert_url!("http://localhost:9000/search.json?title=Dune");
    }

    #[test]
    fn valid_json_produces_first_isbn_and_author() {
        let source = OpenLibrary::<MockClient<ValidJsonProducer>>::new();
        let candidate = source
            .search("The Hobbit")
            .candidate()
            .expect("ValidJsonProducer always contains a doc with an ISBN");

        assert_eq!("9780345339683", candidate.isbn);
        assert_eq!(Some("J.R.R. Tolkien"), candidate.author.as_deref());
        assert_eq!(Origin::OpenLibrary, candidate.origin);
    }

    #[test]
    fn empty_docs_is_absent() {
        let source = OpenLibrary::<MockClient<EmptyDocsProducer>>::new();
        assert!(matches!(source.search("test"), Lookup::Absent));
    }

    #[test]
    fn doc_without_isbn_is_absent() {
        let source = OpenLibrary::<MockClient<NoIsbnProducer>>::new();
        assert!(matches!(source.search("The Hobbit"), Lookup::Absent));
    }

    #[test]
    fn doc_without_author_still_produces_candidate() {
        let source = OpenLibrary::<MockClient<NoAuthorProducer>>::new();
        let candidate = source.search("Dune").candidate().unwrap();

        assert_eq!("9780441013593", candidate.isbn);
        assert_eq!(None, candidate.author);
    }

    #[test]
    fn network_error_is_failed_transport() {
        let source = OpenLibrary::<MockClient<NetworkErrorProducer>>::new();
        match source.search("test") {
            Lookup::Failed(err) => assert_eq!(ErrorKind::Transport, err.kind()),
            other => panic!("expected a failed lookup, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_failed_parse() {
        let source = OpenLibrary::<MockClient<MalformedProducer>>::new();
        match source.search("test") {
            Lookup::Failed(err) => assert_eq!(ErrorKind::Parse, err.kind()),
            other => panic!("expected a failed lookup, got {other:?}"),
        }
    }

    #[test]
    fn search_model_can_be_derived_from_json() {
        let model: SearchModel = serde_json::from_str(OPEN_LIBRARY_JSON).unwrap();
        assert_eq!(2, model.docs.len());
        assert_eq!("J.R.R. Tolkien", model.docs[0].author_name[0]);
    }
}
