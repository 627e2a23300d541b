//! Classified request errors
//!
//! Every engine operation ends in a decoded value or exactly one
//! [`ApiError`]. Screens show [`ApiError::user_message`] and never inspect
//! the cause.

use gigboard_domain::{ApiErrorKind, DomainError, Locale};
use thiserror::Error;

use crate::ports::TransportError;

/// Failure of a request made through the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The URL, query or body could not be built.
    #[error("invalid request target: {0}")]
    InvalidRequestTarget(String),

    /// The server sent no body where one was expected.
    #[error("the server returned an empty response")]
    EmptyResponse,

    /// The body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    DecodeFailure(String),

    /// The server answered with an error status.
    #[error("{0}")]
    ServerFailure(String),

    /// The server rejected the session token.
    #[error("session is no longer valid")]
    Unauthorized,

    /// No HTTP response was received.
    #[error("transport failure: {0}")]
    TransportFailure(#[source] TransportError),

    /// The caller aborted the request.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Returns the user-facing category.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        match self {
            Self::InvalidRequestTarget(_) => ApiErrorKind::InvalidRequestTarget,
            Self::EmptyResponse => ApiErrorKind::EmptyResponse,
            Self::DecodeFailure(_) => ApiErrorKind::DecodeFailure,
            Self::ServerFailure(_) => ApiErrorKind::ServerFailure,
            Self::Unauthorized => ApiErrorKind::Unauthorized,
            Self::TransportFailure(_) => ApiErrorKind::TransportFailure,
            Self::Cancelled => ApiErrorKind::Cancelled,
        }
    }

    /// Returns the text to show the user.
    ///
    /// Server failures carry the server's own message, which is already
    /// meant for display; every other kind uses the localized table.
    #[must_use]
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            Self::ServerFailure(message) => message.clone(),
            other => other.kind().message(locale).to_string(),
        }
    }

    /// Returns true for `Cancelled`.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::InvalidRequestTarget(error.to_string())
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Cancelled => Self::Cancelled,
            other => Self::TransportFailure(other),
        }
    }
}

/// Result type alias for engine and facade operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transport_cancellation_is_not_a_transport_failure() {
        assert_eq!(ApiError::from(TransportError::Cancelled), ApiError::Cancelled);
        assert_eq!(
            ApiError::from(TransportError::Timeout { timeout_ms: 10 }),
            ApiError::TransportFailure(TransportError::Timeout { timeout_ms: 10 })
        );
    }

    #[test]
    fn test_domain_errors_are_request_target_errors() {
        let error = ApiError::from(DomainError::InvalidBody("expected a JSON object".into()));
        assert_eq!(error.kind(), ApiErrorKind::InvalidRequestTarget);
    }

    #[test]
    fn test_user_message_prefers_server_detail() {
        let error = ApiError::ServerFailure("This job is full.".to_string());
        assert_eq!(error.user_message(Locale::Spanish), "This job is full.");

        let error = ApiError::TransportFailure(TransportError::ConnectionFailed("reset".into()));
        assert_eq!(
            error.user_message(Locale::English),
            ApiErrorKind::TransportFailure.message(Locale::English)
        );
    }

    #[test]
    fn test_display_keeps_the_server_message() {
        let error = ApiError::ServerFailure("Email already registered".to_string());
        assert_eq!(error.to_string(), "Email already registered");
    }
}
