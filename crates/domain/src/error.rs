//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while describing a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The request body could not be turned into a JSON object.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// The query parameters could not be url-encoded.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
