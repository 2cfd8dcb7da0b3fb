//! Error types for note-cards

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while scanning, parsing and presenting notes
#[derive(Debug, Error)]
pub enum Error {
    /// The scan root is missing or is not a directory
    #[error("root directory not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// The scan root exists but cannot be listed
    #[error("cannot read root directory '{}': {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory could not be listed
    #[error("failed to read directory '{}': {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document could not be read as UTF-8 text
    #[error("failed to read '{}': {source}", path.display())]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document was read but could not be turned into a note
    #[error("failed to parse '{}': {reason}", path.display())]
    DocumentParse { path: PathBuf, reason: String },

    /// A tag outside the current vocabulary was selected
    #[error("unknown tag '{0}'")]
    UnknownTag(String),

    /// The preference store could not be read or written
    #[error("preference store '{}': {reason}", path.display())]
    Preference { path: PathBuf, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    /// The host failed to open a document
    #[error("failed to open '{}': {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Template(#[from] askama::Error),
}

impl Error {
    /// Whether the error aborts the whole operation rather than one item
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::DirectoryRead { .. } | Error::DocumentRead { .. } | Error::DocumentParse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_item_errors_are_not_fatal() {
        let err = Error::DocumentParse {
            path: PathBuf::from("/notes/a.md"),
            reason: "bad".to_string(),
        };
        assert!(!err.is_fatal());

        let err = Error::DirectoryRead {
            path: PathBuf::from("/notes/private"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_root_not_found_is_fatal() {
        let err = Error::RootNotFound { path: PathBuf::from("/missing") };
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "root directory not found: /missing");
    }
}
