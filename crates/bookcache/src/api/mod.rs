use reqwest::Url;
use serde::{de::DeserializeOwned, Serialize};

pub(crate) mod appwrite;
pub(crate) mod google_books;
pub(crate) mod open_library;

/// A minimal blocking HTTP client used by the cache store and the sources.
///
/// Header pairs are passed through untouched, every other detail of the request is left to the
/// implementing client.
pub trait Client
where
    Self: Default,
{
    /// Sends a `GET` request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Transport`] when the request cannot be sent or the status is not 2xx.
    /// [`ErrorKind::Parse`] when the response body is not the expected JSON shape.
    fn get_json<T>(&self, url: Url, headers: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned;

    /// Sends a `POST` request with a JSON body, the response body is ignored.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::Transport`] when the request cannot be sent or the status is not 2xx.
    fn post_json<B>(&self, url: Url, headers: &[(&str, &str)], body: &B) -> Result<(), Error>
    where
        B: Serialize + ?Sized;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: Url, headers: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let mut request = self.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        request
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Error::wrap(ErrorKind::Transport, e))
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Parse, e)))
    }

    fn post_json<B>(&self, url: Url, headers: &[(&str, &str)], body: &B) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        request
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map(|_| ())
            .map_err(|e| Error::wrap(ErrorKind::Transport, e))
    }
}

pub(crate) fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| Error::wrap(ErrorKind::Parse, e))
}

/// Builds a URL from `base` with the query `params` percent encoded.
pub(crate) fn url_with_params<'a, I>(base: &str, params: I) -> Result<Url, Error>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    Url::parse_with_params(base, params).map_err(|e| Error::wrap(ErrorKind::Parse, e))
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, MockClient, NetworkErrorProducer, Producer, BODY_SINK,
    HEADER_SINK, URL_SINK,
};

use crate::{Error, ErrorKind};

#[cfg(test)]
mod test {

    use super::*;

    thread_local! {
        pub(crate) static URL_SINK: std::cell::RefCell<Option<String>> = std::cell::RefCell::new(None);
        pub(crate) static HEADER_SINK: std::cell::RefCell<Vec<(String, String)>> = std::cell::RefCell::new(Vec::new());
        pub(crate) static BODY_SINK: std::cell::RefCell<Option<String>> = std::cell::RefCell::new(None);
    }

    /// Asserts that the expected URL is the same as the last one provided to the [`MockClient`].
    ///
    /// The [`MockClient`] will update the static thread local `URL_SINK` with the URL string that
    /// was passed to it, this allows for asserting that implementing functions or methods are
    /// building the correct URL.
    macro_rules! assert_url {
        ($expected: expr) => {
            assert_url!($expected, "");
        };
        ($expected: expr, $($arg: tt)+) => {
            let url = crate::api::URL_SINK.with(|url| url.borrow().clone().unwrap_or_default());
            assert_eq!($expected, url, $($arg)+);
        };
    }

    pub(crate) trait Producer<T>
    where
        Self: Default,
    {
        fn produce() -> Result<T, Error>;
    }

    #[derive(Default)]
    pub(crate) struct MockClient<P: Producer<String> = EmptyTextProducer> {
        _producer: std::marker::PhantomData<P>,
    }

    fn record(url: &Url, headers: &[(&str, &str)]) {
        URL_SINK.with(|sink| *sink.borrow_mut() = Some(url.as_str().to_owned()));
        HEADER_SINK.with(|sink| {
            *sink.borrow_mut() = headers
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect();
        });
    }

    impl<P: Producer<String>> Client for MockClient<P> {
        fn get_json<T>(&self, url: Url, headers: &[(&str, &str)]) -> Result<T, Error>
        where
            T: DeserializeOwned,
        {
            record(&url, headers);
            P::produce().and_then(|json| {
                serde_json::from_str(&json).map_err(|e| Error::wrap(ErrorKind::Parse, e))
            })
        }

        fn post_json<B>(&self, url: Url, headers: &[(&str, &str)], body: &B) -> Result<(), Error>
        where
            B: Serialize + ?Sized,
        {
            record(&url, headers);
            let body = serde_json::to_string(body).map_err(|e| Error::wrap(ErrorKind::Parse, e))?;
            BODY_SINK.with(|sink| *sink.borrow_mut() = Some(body));
            P::produce().map(|_| ())
        }
    }

    macro_rules! impl_text_producer {
        ($($producer:ident => $exp:expr,)*) => {
            $(
                #[derive(Default)]
                pub(crate) struct $producer;

                impl crate::api::Producer<String> for $producer {
                    fn produce() -> Result<String, crate::Error> {
                        $exp
                    }
                }
            )*
        };
    }
    impl_text_producer! {
        EmptyTextProducer => Ok("".to_owned()),
        NetworkErrorProducer => Err(Error::new(ErrorKind::Transport, "Network error")),
    }

    pub(crate) use assert_url;
    pub(crate) use impl_text_producer;
}

#[cfg(test)]
mod tests {
    #[test]
    fn params_are_percent_encoded() {
        let url = super::url_with_params("https://example.org/search", [("title", "The Hobbit")])
            .expect("base url is valid");
        assert_eq!("https://example.org/search?title=The+Hobbit", url.as_str());
    }

    #[test]
    fn invalid_base_is_parse_error() {
        let err = super::parse_url("not a url").expect_err("base url is invalid");
        assert_eq!(crate::ErrorKind::Parse, err.kind());
    }
}
