//! Error types for static content serving
//!
//! Every variant is terminal for the request that produced it and maps
//! onto exactly one HTTP status.

use hyper::StatusCode;
use std::io;
use thiserror::Error;

/// Outcome of a request that could not be answered with file content
#[derive(Debug, Error)]
pub enum ServeError {
    /// Nothing servable exists at the resolved path
    #[error("not found")]
    NotFound,

    /// The resolved path is a directory without an index file
    #[error("directory browsing is disabled")]
    Forbidden,

    /// The filesystem failed while reading an existing entry
    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl ServeError {
    /// HTTP status this error is reported with
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<io::Error> for ServeError {
    fn from(err: io::Error) -> Self {
        // A file removed between stat and read is still a plain 404,
        // as is a path that walks through a regular file
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => Self::NotFound,
            _ => Self::Io(err),
        }
    }
}

pub type ServeResult<T> = Result<T, ServeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ServeError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ServeError::Forbidden.status(), StatusCode::FORBIDDEN);
        let io_err = ServeError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(io_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_io_not_found_becomes_not_found() {
        let err: ServeError = io::Error::from(io::ErrorKind::NotFound).into();
        assert!(matches!(err, ServeError::NotFound));

        let err: ServeError = io::Error::from(io::ErrorKind::NotADirectory).into();
        assert!(matches!(err, ServeError::NotFound));

        let err: ServeError = io::Error::from(io::ErrorKind::PermissionDenied).into();
        assert!(matches!(err, ServeError::Io(_)));
    }
}
