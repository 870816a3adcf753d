//! Error types for binding generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenResult<T> = Result<T, GenError>;

/// Error type for generation operations
///
/// Every variant aborts the whole run. Unsupported type-expressions on a single
/// message are not errors; they surface as skipped messages unless strict mode
/// promotes them to [`GenError::UnsupportedMessages`].
#[derive(Error, Debug)]
pub enum GenError {
    /// The description document could not be read
    #[error("failed to read description {path:?}: {source}")]
    ReadDescription {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The description document is not valid JSON for the expected model
    #[error("failed to parse description {path:?}: {source}")]
    ParseDescription {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem error while applying the build plan
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Strict mode found messages that could not be bound
    #[error("{count} message(s) skipped for unsupported type-expressions")]
    UnsupportedMessages { count: usize },
}

impl GenError {
    /// Wrap an I/O error with the path it occurred at
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for GenError {
    fn from(err: toml::de::Error) -> Self {
        GenError::Config(err.to_string())
    }
}
