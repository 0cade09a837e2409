//! Unified error type.

use std::fmt;

use crate::method::Method;

/// The error type returned by quill's fallible operations.
///
/// Everything except [`Error::Io`] is a configuration error raised while the
/// route table is being built: the process should refuse to start. A request
/// that matches no route is not an error; it is a `404` response.
#[derive(Debug)]
pub enum Error {
    /// A path pattern could not be compiled.
    InvalidRoute { pattern: String, reason: String },
    /// A handler identifier is not of the form `controller#action`.
    InvalidHandler(String),
    /// A route points at a handler that no controller provides.
    UndefinedHandler { handler: String, method: Method, pattern: String },
    /// Binding to a port or accepting a connection failed.
    Io(std::io::Error),
}

impl Error {
    pub(crate) fn invalid_route(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRoute { pattern: pattern.to_owned(), reason: reason.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRoute { pattern, reason } => {
                write!(f, "invalid route `{pattern}`: {reason}")
            }
            Self::InvalidHandler(id) => {
                write!(f, "invalid handler `{id}`: expected `controller#action`")
            }
            Self::UndefinedHandler { handler, method, pattern } => {
                write!(f, "route {method} {pattern} points at undefined handler `{handler}`")
            }
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
