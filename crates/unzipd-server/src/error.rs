//! Startup errors.
//!
//! Raised while turning configuration into a [`ServiceState`]. Anything that
//! goes wrong while serving a request is a [`handler::Error`] instead.
//!
//! [`ServiceState`]: crate::service::ServiceState
//! [`handler::Error`]: crate::handler::Error

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use unzipd_opendal::StorageError;

/// Boxed, thread-safe error used as the source of an [`Error`].
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result of building service state.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// What part of startup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A setting is missing or contradicts another one.
    Config,
    /// The object store could not be set up.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => f.write_str("configuration"),
            Self::Storage => f.write_str("storage"),
        }
    }
}

/// A startup failure with an optional underlying cause.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    /// A setting is missing or invalid.
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: ErrorKind::Config,
            message: message.into(),
            source: None,
        }
    }

    /// The object store rejected its configuration.
    pub fn storage(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: ErrorKind::Storage,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(self, source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..self
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::storage(err.to_string()).with_source(err)
    }
}
