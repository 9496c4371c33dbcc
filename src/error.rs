//! Pokedex Explorer error types

use thiserror::Error;

/// Pokedex Explorer error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error, including a generation number outside 1..=9
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream catalog failure (non-2xx response or transport error)
    #[error("Upstream error{}: {message}", status.map(|s| format!(" (status {})", s)).unwrap_or_default())]
    Upstream {
        /// HTTP status reported by the upstream, when a response was received
        status: Option<u16>,
        message: String,
    },

    /// Invalid request input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build an upstream error from a status code and message
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// True when the upstream answered 404
    pub fn is_upstream_not_found(&self) -> bool {
        matches!(self, Self::Upstream { status: Some(404), .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Result type alias for Pokedex Explorer operations
pub type Result<T> = std::result::Result<T, Error>;
