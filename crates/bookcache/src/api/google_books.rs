use log::{info, trace};
use serde::Deserialize;

use crate::{
    model::{BookCandidate, Lookup, Origin},
    source::Source,
    Error,
};

use super::{url_with_params, Client};

const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Title search against the Google Books volumes API.
#[derive(Default)]
pub struct GoogleBooks<C: Client = reqwest::blocking::Client> {
    client: C,
    base_url: Option<String>,
}

impl<C: Client> GoogleBooks<C> {
    /// Creates a source using the public Google Books endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: C::default(),
            base_url: None,
        }
    }

    /// Points the source at a different volumes endpoint.
    #[must_use]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(GOOGLE_BOOKS_URL)
    }

    pub(crate) fn get_candidate(&self, title: &str) -> Result<Option<BookCandidate>, Error> {
        info!("Searching for title '{title}' using Google Books API");
        let query = format!("intitle:{title}");
        let url = url_with_params(self.base_url(), [("q", query.as_str())])?;

        let GoogleModel { items } = self.client.get_json(url, &[])?;
        trace!("Request was successful");

        Ok(items
            .into_iter()
            .next()
            .and_then(|item| item.volume_info.build()))
    }
}

impl<C: Client + Send + Sync> Source for GoogleBooks<C> {
    fn origin(&self) -> Origin {
        Origin::GoogleBooks
    }

    fn search(&self, title: &str) -> Lookup {
        self.get_candidate(title).into()
    }
}

// `items` is left out entirely when nothing matches.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct GoogleModel {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Item {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

/// Volume information from the Google Book API
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct VolumeInfo {
    #[serde(default)]
    authors: Vec<String>,
    #[serde(rename = "industryIdentifiers", default)]
    industry_identifiers: Vec<IndustryIdentifier>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct IndustryIdentifier {
    #[serde(rename = "type")]
    kind: String,
    identifier: String,
}

impl VolumeInfo {
    fn isbn(&self, kind: &str) -> Option<&str> {
        self.industry_identifiers
            .iter()
            .find(|id| id.kind == kind && !id.identifier.is_empty())
            .map(|id| id.identifier.as_str())
    }

    fn build(self) -> Option<BookCandidate> {
        let isbn = self.isbn("ISBN_13").or_else(|| self.isbn("ISBN_10"))?.to_owned();
        let author = self.authors.into_iter().find(|author| !author.is_empty());
        Some(BookCandidate::new(isbn, author, Origin::GoogleBooks))
    }
}
