/// Connection details for the Appwrite collection used as the title cache.
///
/// Every field is required, there are no defaults.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the Appwrite API, e.g. `https://cloud.appwrite.io/v1`.
    pub endpoint: String,
    /// Project the API key belongs to.
    pub project_id: String,
    /// Server API key with document read and write scopes.
    pub api_key: String,
    /// Database holding the cache collection.
    pub database_id: String,
    /// Collection holding one document per resolved title.
    pub collection_id: String,
}

impl Config {
    /// URL of the documents resource of the configured collection.
    #[must_use]
    pub fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint.trim_end_matches('/'),
            self.database_id,
            self.collection_id
        )
    }
}

// The API key is kept out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("api_key", &"<redacted>")
            .field("database_id", &self.database_id)
            .field("collection_id", &self.collection_id)
            .finish()
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        endpoint: "https://appwrite.example.org/v1/".to_owned(),
        project_id: "bookcache".to_owned(),
        api_key: "secret-key".to_owned(),
        database_id: "books".to_owned(),
        collection_id: "titles".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn documents_url_trims_trailing_slash() {
        assert_eq!(
            "https://appwrite.example.org/v1/databases/books/collections/titles/documents",
            super::test_config().documents_url()
        );
    }

    #[test]
    fn debug_does_not_print_api_key() {
        let debug = format!("{:?}", super::test_config());
        assert!(!debug.contains("secret-key"), "{debug}");
    }
}
