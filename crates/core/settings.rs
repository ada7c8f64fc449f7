use std::{fs, path::Path};

use bookcache::{Config, Error, ErrorKind};
use clap::Args;
use log::trace;
use serde::Deserialize;

/// Cache store settings, read from a TOML file and/or the command line and environment.
///
/// Every value is optional here so the sources can be layered, [`StoreSettings::into_config`]
/// checks that the result is complete.
#[derive(Args, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreSettings {
    /// Base URL of the Appwrite API
    #[clap(long, env = "APPWRITE_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Appwrite project id
    #[clap(long, env = "APPWRITE_PROJECT_ID", global = true)]
    pub project_id: Option<String>,

    /// Appwrite API key with document read and write access
    #[clap(long, env = "APPWRITE_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Database holding the title cache collection
    #[clap(long, env = "APPWRITE_DATABASE_ID", global = true)]
    pub database_id: Option<String>,

    /// Collection holding the title cache documents
    #[clap(long, env = "APPWRITE_COLLECTION_ID", global = true)]
    pub collection_id: Option<String>,
}

impl StoreSettings {
    /// Reads settings from the TOML file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> eyre::Result<Self> {
        let path = path.as_ref();
        trace!("Reading settings from '{}'", path.display());
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Layers `overrides` on top of `self`, values present in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            endpoint: overrides.endpoint.or(self.endpoint),
            project_id: overrides.project_id.or(self.project_id),
            api_key: overrides.api_key.or(self.api_key),
            database_id: overrides.database_id.or(self.database_id),
            collection_id: overrides.collection_id.or(self.collection_id),
        }
    }

    /// Checks every value is present and builds the store [`Config`].
    pub fn into_config(self) -> Result<Config, Error> {
        Ok(Config {
            endpoint: required(self.endpoint, "endpoint", "APPWRITE_ENDPOINT")?,
            project_id: required(self.project_id, "project_id", "APPWRITE_PROJECT_ID")?,
            api_key: required(self.api_key, "api_key", "APPWRITE_API_KEY")?,
            database_id: required(self.database_id, "database_id", "APPWRITE_DATABASE_ID")?,
            collection_id: required(self.collection_id, "collection_id", "APPWRITE_COLLECTION_ID")?,
        })
    }
}

fn required(value: Option<String>, key: &str, env: &str) -> Result<String, Error> {
    value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
        Error::new(
            ErrorKind::Config,
            format!("missing required setting '{key}' (set it in the config file or {env})"),
        )
    })
}
