/*!
 * Error types for plugsign
 */

use std::fmt;
use std::io;
use std::path::PathBuf;

use plugsign_core_manifest::Error as ManifestError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PluginSignError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FATAL: i32 = 2;
pub const EXIT_INTEGRITY: i32 = 3;

#[derive(Debug, Error)]
pub enum PluginSignError {
    /// Content root does not exist or is not a directory
    #[error("Plugin content directory not found: {}", .0.display())]
    ContentRootNotFound(PathBuf),

    /// Symbolic link resolves outside the content root
    #[error("Traversal error: symbolic link {link} escapes base directory {}", .base.display())]
    Traversal { link: String, base: PathBuf },

    /// Plugin descriptor missing or malformed
    #[error("Descriptor error: {0}")]
    Descriptor(String),

    /// I/O error while hashing or writing
    #[error("I/O error: {0}")]
    Io(String),

    /// No signing credential configured
    #[error("Credential error: {0}")]
    Credential(String),

    /// Signing service answered with a non-success status
    #[error("Signing error: server responded with {status}: {body}")]
    Signing { status: u16, body: String },

    /// Signing request never produced a response
    #[error("Signing error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PluginSignError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // A package trying to manifest files outside itself is an integrity failure
            PluginSignError::Traversal { .. } => EXIT_INTEGRITY,
            _ => EXIT_FATAL,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            PluginSignError::ContentRootNotFound(_) | PluginSignError::Descriptor(_) => {
                ErrorCategory::Validation
            }
            PluginSignError::Traversal { .. } => ErrorCategory::Security,
            PluginSignError::Io(_) => ErrorCategory::IoError,
            PluginSignError::Credential(_) => ErrorCategory::Credential,
            PluginSignError::Signing { .. } | PluginSignError::Transport(_) => {
                ErrorCategory::Network
            }
            PluginSignError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Whether the signing service was reached at all
    pub fn is_network_error(&self) -> bool {
        matches!(self, PluginSignError::Transport(_))
    }
}

/// Error category for classification and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Content root and descriptor validation
    Validation,
    /// Path escapes
    Security,
    /// Filesystem read/write failures
    IoError,
    /// Missing credentials
    Credential,
    /// Signing service failures
    Network,
    /// Configuration errors
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Security => write!(f, "security"),
            ErrorCategory::IoError => write!(f, "io"),
            ErrorCategory::Credential => write!(f, "credential"),
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Configuration => write!(f, "configuration"),
        }
    }
}

impl From<ManifestError> for PluginSignError {
    fn from(err: ManifestError) -> Self {
        match err {
            ManifestError::PathEscape { link, base } => PluginSignError::Traversal { link, base },
            ManifestError::Descriptor { .. } => PluginSignError::Descriptor(err.to_string()),
            ManifestError::Io { .. } | ManifestError::Walk(_) | ManifestError::NonUtf8Path(_) => {
                PluginSignError::Io(err.to_string())
            }
            ManifestError::Json(e) => {
                PluginSignError::Config(format!("Failed to serialize manifest: {}", e))
            }
        }
    }
}

impl From<io::Error> for PluginSignError {
    fn from(err: io::Error) -> Self {
        PluginSignError::Io(err.to_string())
    }
}
