//! Application-wide error types.
//!
//! Library modules return [`Error`] via the [`Result`] alias, while
//! `main` uses `anyhow` for convenient error propagation and reporting.
//!
//! Every variant is terminal: the exporter never retries, and a failed
//! run never leaves a partial export behind.
//!
//! # Example
//!
//! ```ignore
//! use plex_ratings_export::error::{Error, Result};
//!
//! fn require_token(token: Option<String>) -> Result<String> {
//!     token.ok_or_else(|| Error::configuration("PLEX_TOKEN not set"))
//! }
//! ```

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or invalid configuration, detected before any network call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Server unreachable, timed out, or rejected the credentials
    #[error("Could not connect to Plex server - {0}")]
    Connection(String),

    /// No music section could be found and none was specified
    #[error("No music library section found (use --section to pick one)")]
    SectionNotFound,

    /// Non-success response while fetching library data
    #[error("HTTP {status} {reason} from {url}")]
    Http {
        status: u16,
        reason: String,
        url: String,
    },

    /// Upstream response did not match the expected JSON shape
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// File I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Error with the file it concerns; the cause follows in the source chain
    #[error("Failed to write {path}")]
    WithPath {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create an HTTP status error.
    pub fn http(status: reqwest::StatusCode, url: impl Into<String>) -> Self {
        Self::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            url: url.into(),
        }
    }

    /// Attach the file path this error concerns.
    pub fn at_path(self, path: impl Into<PathBuf>) -> Self {
        Self::WithPath {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for attaching a path to Results.
pub trait ResultExt<T> {
    /// Attach the file path to an error result.
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| e.into().at_path(path))
    }
}
