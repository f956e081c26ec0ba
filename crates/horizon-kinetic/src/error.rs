//! Error types for Horizon Kinetic.
//!
//! Running animations never fail: malformed values, unknown easings and
//! zero durations are absorbed inside the tween or run. Errors only come
//! from setting the engine up.

use std::path::PathBuf;

/// Result type alias for Horizon Kinetic operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Engine configuration could not be parsed.
    #[error("Invalid engine configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("Failed to read engine configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is out of range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
