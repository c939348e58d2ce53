//! Error types for Postforge.
//!
//! Library crates use [`PostforgeError`] via `thiserror`. Per-record
//! failures surface as `Err` values and are absorbed at the batch boundary.

use std::path::PathBuf;

/// Top-level error type for all Postforge operations.
#[derive(Debug, thiserror::Error)]
pub enum PostforgeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Content that cannot be processed (broken decode, control characters).
    #[error("malformed content: {message}")]
    MalformedContent { message: String },

    /// The pluggable cleaning stage failed (backend, prompt, or response).
    #[error("cleaner error: {0}")]
    Cleaner(String),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PostforgeError>;

impl PostforgeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a malformed-content error from any displayable message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedContent {
            message: msg.into(),
        }
    }

    /// Create a cleaner error from any displayable message.
    pub fn cleaner(msg: impl Into<String>) -> Self {
        Self::Cleaner(msg.into())
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
