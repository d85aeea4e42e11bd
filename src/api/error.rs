//! API error types for the JIRA client.
//!
//! Non-success HTTP statuses of ordinary calls are not errors here: they
//! come back as an [`OperationResult`](super::OperationResult) for the
//! caller to inspect. Only login failures and transport or decoding
//! problems are raised.

use thiserror::Error;

/// Errors that abort a JIRA API interaction.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response body was not the JSON that was expected.
    #[error("Invalid JSON in response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The login call was rejected.
    #[error("Authentication failed (HTTP {status})")]
    Authentication {
        /// Status code returned by the session resource.
        status: u16,
    },

    /// Reading a local file (e.g. an attachment) failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
