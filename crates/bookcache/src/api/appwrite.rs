use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{config::Config, model::CacheRecord, store::CacheStore, Error};

use super::{parse_url, url_with_params, Client};

// Appwrite generates the document id server side when given this placeholder.
const UNIQUE_ID: &str = "unique()";

/// [`CacheStore`] backed by an Appwrite document collection.
///
/// Each record is a document with `title` and `canonicalIsbn` attributes plus an optional `author`
/// attribute. The collection has no unique index on `title` and none is assumed here.
pub struct AppwriteStore<C: Client = reqwest::blocking::Client> {
    client: C,
    config: Config,
}

impl<C: Client> AppwriteStore<C> {
    /// Creates a store for the collection described by `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            client: C::default(),
            config,
        }
    }

    fn headers(&self) -> [(&'static str, &str); 2] {
        [
            ("X-Appwrite-Project", self.config.project_id.as_str()),
            ("X-Appwrite-Key", self.config.api_key.as_str()),
        ]
    }
}

impl<C: Client + Send + Sync> CacheStore for AppwriteStore<C> {
    fn find(&self, title: &str) -> Result<Option<CacheRecord>, Error> {
        debug!("Looking up '{title}' in the title cache");
        let query = serde_json::json!({
            "method": "equal",
            "attribute": "title",
            "values": [title],
        })
        .to_string();
        let url = url_with_params(&self.config.documents_url(), [("queries[]", query.as_str())])?;

        let DocumentList { documents } = self.client.get_json(url, &self.headers())?;
        trace!("Request was successful");

        Ok(documents
            .into_iter()
            .next()
            .and_then(|document| document.into_record(title)))
    }

    fn insert(&self, record: &CacheRecord) -> Result<(), Error> {
        debug!(
            "Writing '{}' => '{}' to the title cache",
            record.title, record.isbn
        );
        let url = parse_url(&self.config.documents_url())?;
        let body = CreateDocument {
            document_id: UNIQUE_ID,
            data: record,
        };

        self.client.post_json(url, &self.headers(), &body)
    }
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct DocumentList {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Document {
    title: Option<String>,
    #[serde(rename = "canonicalIsbn")]
    isbn: Option<String>,
    author: Option<String>,
}

impl Document {
    fn into_record(self, title: &str) -> Option<CacheRecord> {
        let Some(isbn) = self.isbn.filter(|isbn| !isbn.is_empty()) else {
            warn!("Cached document for '{title}' has no ISBN - ignoring it");
            return None;
        };

        Some(CacheRecord {
            title: self.title.unwrap_or_else(|| title.to_owned()),
            isbn,
            author: self.author.filter(|author| !author.is_empty()),
        })
    }
}

#[derive(Serialize)]
struct CreateDocument<'a> {
    #[serde(rename = "documentId")]
    document_id: &'a str,
    data: &'a CacheRecord,
}
