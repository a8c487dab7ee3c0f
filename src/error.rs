//! Error types for modguard
//!
//! All modules use `ModguardResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for modguard operations
pub type ModguardResult<T> = Result<T, ModguardError>;

/// All errors that can occur in modguard
#[derive(Error, Debug)]
pub enum ModguardError {
    // Module metadata errors
    #[error("Malformed module metadata {path}: {reason}")]
    MalformedMetadata { path: PathBuf, reason: String },

    // Fingerprint errors
    #[error("Cannot read module content at {path}: {source}")]
    UnreadableModule {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Lock file errors
    #[error("Corrupt lock file {path}: {reason}")]
    CorruptLockFile { path: PathBuf, reason: String },

    #[error("Failed to write lock file {path}: {source}")]
    PersistFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Integrity errors
    #[error("Module {module} has changed! Recorded digest {expected}, found {actual}")]
    TamperDetected {
        module: String,
        expected: String,
        actual: String,
    },

    #[error("Module {0} is not present in the lock file")]
    UnlockedModule(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModguardError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Whether the error means module content no longer matches the lock file
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::TamperDetected { .. } | Self::UnlockedModule(_))
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::TamperDetected { .. } => Some(
                "Review the module source. If the change is expected, remove its entry from the lock file and run init again",
            ),
            Self::UnlockedModule(_) => Some("Run: modguard verify (without --frozen) to record it"),
            Self::CorruptLockFile { .. } => {
                Some("Restore the lock file from version control; it is never reset automatically")
            }
            Self::MalformedMetadata { .. } => Some("Run: terraform init to regenerate module metadata"),
            Self::CommandFailed { .. } => Some("Check that terraform is installed and on PATH"),
            _ => None,
        }
    }
}
