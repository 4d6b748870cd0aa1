//! Unified error handling for plugman.
//!
//! Non-fatal conditions (unknown names, unreadable archives) are aggregated
//! by their callers and surfaced as warnings; everything in this enum is a
//! fatal condition that aborts the invocation.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for plugman operations.
#[derive(Debug, Error)]
pub enum PlugmanError {
    /// Copying a package into the active directory failed
    #[error("failed to activate plugin '{name}': {source}")]
    Activation {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Removing a package from the active directory failed
    #[error("failed to deactivate plugin '{name}': {source}")]
    Deactivation {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing the persisted enabled set failed.
    /// Distinct from activation I/O errors: the filesystem may be fine
    /// while the state file is corrupt, or vice versa.
    #[error("enabled-set state error at {path}: {reason}")]
    State { path: PathBuf, reason: String },

    /// Archive descriptor missing, unreadable or not matching the schema
    #[error("bad plugin archive {archive}: {reason}")]
    Metadata { archive: PathBuf, reason: String },

    /// Configuration parsing or validation errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid name filter pattern on the list command
    #[error("invalid pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },
}

/// Result type alias for plugman operations.
pub type PlugmanResult<T> = Result<T, PlugmanError>;
