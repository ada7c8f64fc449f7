#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # bookcache
//!
//! bookcache resolves a book title to a canonical ISBN and author. Titles are looked up in a
//! persistent cache first, on a miss the configured bibliographic APIs are searched, the most
//! plausible candidate is picked by a majority vote on author and the winner is written back to
//! the cache.
//!
//! ```no_run
//! use bookcache::{Config, Origin};
//!
//! let config = Config {
//!     endpoint: "https://cloud.appwrite.io/v1".to_owned(),
//!     project_id: "project".to_owned(),
//!     api_key: "key".to_owned(),
//!     database_id: "books".to_owned(),
//!     collection_id: "titles".to_owned(),
//! };
//!
//! let resolver = bookcache::resolver(config, &[Origin::OpenLibrary, Origin::GoogleBooks]);
//! match resolver.resolve("The Hobbit") {
//!     Ok(book) => println!("{}", book.isbn),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

mod api;
mod config;
mod error;
pub mod model;
mod resolver;
pub mod select;
mod source;
mod store;

pub use api::{
    appwrite::AppwriteStore, google_books::GoogleBooks, open_library::OpenLibrary, Client,
};
pub use config::Config;
pub use error::{Error, ErrorKind};
pub use model::{BookCandidate, CacheRecord, Lookup, Origin};
pub use resolver::Resolver;
pub use source::Source;
pub use store::CacheStore;

use log::trace;

type DefaultClient = reqwest::blocking::Client;

/// Builds a [`Resolver`] over the Appwrite collection in `config` and the public APIs listed in
/// `origins`.
///
/// Sources are always asked in [`Origin`] priority order regardless of the order in `origins`,
/// duplicates are ignored and [`Origin::Cache`] is implied.
///
/// The returned resolver owns blocking HTTP clients, so it must be created and dropped outside
/// of an async runtime.
#[must_use]
pub fn resolver(config: Config, origins: &[Origin]) -> Resolver {
    let mut origins = origins.to_vec();
    origins.sort_unstable();
    origins.dedup();

    let sources = origins
        .into_iter()
        .filter_map(|origin| -> Option<Box<dyn Source>> {
            trace!("Enabling source '{origin}'");
            match origin {
                Origin::Cache => None,
                Origin::OpenLibrary => Some(Box::new(OpenLibrary::<DefaultClient>::new())),
                Origin::GoogleBooks => Some(Box::new(GoogleBooks::<DefaultClient>::new())),
            }
        })
        .collect();

    Resolver::new(AppwriteStore::<DefaultClient>::new(config), sources)
}
