//! Error types for seoforge.
//!
//! Library crates use [`SeoForgeError`] via `thiserror`. Threshold
//! violations are caller-precondition errors surfaced at construction
//! time, not runtime failures inside the pure components.

use std::path::PathBuf;

/// Top-level error type for all seoforge operations.
#[derive(Debug, thiserror::Error)]
pub enum SeoForgeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A qualification threshold outside its documented domain.
    #[error("invalid threshold: {message}")]
    InvalidThreshold { message: String },

    /// Data validation error (malformed article, bad slug, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Serialization error (JSON, YAML, or TOML output).
    #[error("serialize error: {0}")]
    Serialize(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SeoForgeError>;

impl SeoForgeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an invalid-threshold error from any displayable message.
    pub fn invalid_threshold(msg: impl Into<String>) -> Self {
        Self::InvalidThreshold {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
