//! Request handler module
//!
//! Resolves request paths to files under the served root and converts
//! every failure into a terminal HTTP status at a single boundary.

pub mod path;
pub mod router;
pub mod static_files;

pub use router::handle_request;

use std::fmt;

/// Per-request failure taxonomy
///
/// All three variants are terminal: the router converts them to a status
/// code and the request ends there. Nothing propagates past the handler.
#[derive(Debug)]
pub enum ServeError {
    /// Resolved path escapes the served root
    Forbidden,
    /// No such file after the directory/index rewrite
    NotFound,
    /// Any other I/O failure during resolution or open
    Io(std::io::Error),
}

impl From<std::io::Error> for ServeError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Io(err)
        }
    }
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forbidden => write!(f, "path escapes served root"),
            Self::NotFound => write!(f, "file not found"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn not_found_kind_maps_to_not_found() {
        let err = ServeError::from(Error::new(ErrorKind::NotFound, "gone"));
        assert!(matches!(err, ServeError::NotFound));
    }

    #[test]
    fn other_kinds_map_to_io() {
        let err = ServeError::from(Error::new(ErrorKind::PermissionDenied, "nope"));
        assert!(matches!(err, ServeError::Io(_)));
    }
}
