//! Error types for remote playlist calls and shuffle runs.

use thiserror::Error;

/// A failure reported by the remote playlist service for a single request.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Network, TLS or body decoding failure raised by reqwest.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Spotify API responded with {status}: {message}")]
    Api { status: u16, message: String },

    /// No usable access token could be obtained.
    #[error("authentication failed: {0}")]
    Auth(String),
}

/// A fatal error that aborts a shuffle run.
#[derive(Debug, Error)]
pub enum ShuffleError {
    #[error("{operation} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        #[source]
        source: ServiceError,
    },
}

impl ShuffleError {
    /// Name of the remote operation that failed.
    pub fn operation(&self) -> &str {
        match self {
            ShuffleError::RetriesExhausted { operation, .. } => operation,
        }
    }
}
