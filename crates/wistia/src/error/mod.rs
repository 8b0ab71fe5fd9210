mod macros;

use crate::prelude::*;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing_error::SpanTrace;

pub(crate) use macros::*;

pub(crate) mod prelude {
    pub(crate) use super::{err, err_ctx};
}

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Describes any possible error that may be returned by the client.
///
/// Use [`Error::kind()`] to inspect what exactly went wrong.
#[derive(Clone)]
pub struct Error {
    imp: Arc<ErrorImp>,
}

struct ErrorImp {
    kind: ErrorKind,

    // Participates only in debug impl
    spantrace: SpanTrace,
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Failed to load the configuration from environment variables")]
    ConfigEnv { source: envy::Error },

    #[error("Expiry delta {delta:?} is out of the representable date range")]
    ExpiryOutOfRange { delta: Duration },

    #[error("Failed to build a URL for the relative path '{rel_path}'")]
    InvalidUrl {
        rel_path: String,
        source: url::ParseError,
    },

    #[error(transparent)]
    HttpClient {
        #[from]
        source: crate::http::HttpClientError,
    },

    /// The response is valid JSON, but it doesn't contain the fields we need.
    #[error("Received an unexpected response JSON object from '{rel_path}'")]
    UnexpectedResponseShape {
        rel_path: String,
        source: serde_json::Error,
    },
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.imp.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.imp.kind, f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.imp.kind.source()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.imp.kind, f)?;
        fmt::Display::fmt(&self.imp.spantrace, f)
    }
}

impl<T: Into<ErrorKind>> From<T> for Error {
    #[track_caller]
    fn from(kind: T) -> Self {
        let imp = ErrorImp {
            kind: kind.into(),
            spantrace: SpanTrace::capture(),
        };

        let err = Self { imp: Arc::new(imp) };

        trace!(err = tracing_err(&err), "Created an error");

        err
    }
}
