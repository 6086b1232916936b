//! Error types for registry operations

use thiserror::Error;

/// Registry and probe errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The HTTP request itself failed (connect, timeout, TLS)
    #[error("registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-200 status
    #[error("registry returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The GraphQL response carried an `errors` array
    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    /// The response body could not be decoded
    #[error("failed to decode registry response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A well-formed response was missing the data the caller needed
    #[error("registry response missing field: {0}")]
    MissingData(String),
}
