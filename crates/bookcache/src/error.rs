//! Errors raised while resolving a title.
//!
//! Only the resolver decides what an error means for a request. Adapters report
//! [`ErrorKind::Transport`] and [`ErrorKind::Parse`] failures, the resolver logs them and carries
//! on as if the cache missed or the source had nothing, so [`ErrorKind::NotFound`] is the one kind
//! a resolution hands back. [`ErrorKind::Config`] is raised before any resolution, while the store
//! settings are assembled.

pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// The Errors that may occur when resolving a title.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    source: Option<DynError>,
}

/// Types of errors that make up an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// An outbound call failed to connect or the remote answered with a non-2xx status.
    Transport,
    /// The payload (or the URL built for a request) did not have the expected shape.
    Parse,
    /// No candidate was found for a title in the cache or any source.
    NotFound,
    /// Required configuration is missing or malformed.
    Config,
}

impl Error {
    /// Creates a new [`Error`] based on the [`ErrorKind`] and message to describe the error.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Wraps an existing error as the source of [`Error`].
    pub fn wrap<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<DynError>,
    {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Returns the kind of error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Shortcut for checking whether this is a [`ErrorKind::NotFound`] error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::Transport => f.write_str("Transport error")?,
            ErrorKind::Parse => f.write_str("Parse error")?,
            ErrorKind::NotFound => f.write_str("Not found")?,
            ErrorKind::Config => f.write_str("Configuration error")?,
        };

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }

        if let Some(cause) = &self.source {
            write!(f, ": caused by {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}
