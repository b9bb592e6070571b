//! Error types for manifest construction

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a plugin manifest
#[derive(Error, Debug)]
pub enum Error {
    /// A symbolic link resolves outside the content root
    #[error("Symbolic link {link} escapes base directory {base}")]
    PathEscape { link: String, base: PathBuf },

    /// The plugin descriptor is missing, unreadable or malformed
    #[error("Invalid plugin descriptor {path}: {reason}")]
    Descriptor { path: PathBuf, reason: String },

    /// I/O error on a specific path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Directory enumeration failed
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// A path cannot be expressed as a manifest key
    #[error("Path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a path escape error
    pub fn path_escape<S: Into<String>, P: Into<PathBuf>>(link: S, base: P) -> Self {
        Error::PathEscape {
            link: link.into(),
            base: base.into(),
        }
    }

    /// Create a descriptor error
    pub fn descriptor<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        Error::Descriptor {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Attach a path to an I/O error
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True for a symbolic link that points outside the content root
    pub fn is_path_escape(&self) -> bool {
        matches!(self, Error::PathEscape { .. })
    }
}
