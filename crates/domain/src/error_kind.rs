//! User-facing error categories.
//!
//! Every failure of the request engine belongs to exactly one
//! [`ApiErrorKind`]. The kind carries the short, localized text shown to the
//! user, so screens never need to look at the underlying cause.

use serde::{Deserialize, Serialize};

/// Languages the client ships messages for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// English.
    #[default]
    English,
    /// Spanish.
    Spanish,
}

impl Locale {
    /// Picks a locale from a language tag such as `es-MX` or `en_US.UTF-8`.
    /// Unknown languages fall back to English.
    #[must_use]
    pub fn from_language_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "es" => Self::Spanish,
            _ => Self::English,
        }
    }
}

/// Closed set of request failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// The request could not be built.
    InvalidRequestTarget,
    /// The server answered without the expected body.
    EmptyResponse,
    /// The response body did not match the expected shape.
    DecodeFailure,
    /// The server rejected the request or failed to process it.
    ServerFailure,
    /// The session is no longer valid.
    Unauthorized,
    /// The network request could not be completed.
    TransportFailure,
    /// The caller aborted the request.
    Cancelled,
}

impl ApiErrorKind {
    /// Returns a short title for this error type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidRequestTarget => "Invalid Request",
            Self::EmptyResponse => "Empty Response",
            Self::DecodeFailure => "Unexpected Response",
            Self::ServerFailure => "Server Error",
            Self::Unauthorized => "Session Expired",
            Self::TransportFailure => "Connection Problem",
            Self::Cancelled => "Request Cancelled",
        }
    }

    /// Returns the user-facing message in the given locale.
    #[must_use]
    pub const fn message(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::English => match self {
                Self::InvalidRequestTarget => "The request could not be created.",
                Self::EmptyResponse => "The server returned no data.",
                Self::DecodeFailure => "The server response could not be read.",
                Self::ServerFailure => "Something went wrong on our side. Please try again.",
                Self::Unauthorized => "Your session has expired. Please sign in again.",
                Self::TransportFailure => "Check your internet connection and try again.",
                Self::Cancelled => "The request was cancelled.",
            },
            Locale::Spanish => match self {
                Self::InvalidRequestTarget => "No se pudo crear la solicitud.",
                Self::EmptyResponse => "El servidor no devolvió datos.",
                Self::DecodeFailure => "No se pudo leer la respuesta del servidor.",
                Self::ServerFailure => "Algo salió mal. Inténtalo de nuevo.",
                Self::Unauthorized => "Tu sesión ha expirado. Inicia sesión de nuevo.",
                Self::TransportFailure => "Revisa tu conexión a internet e inténtalo de nuevo.",
                Self::Cancelled => "La solicitud fue cancelada.",
            },
        }
    }

    /// Returns true if the failure may go away on its own.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::TransportFailure | Self::ServerFailure)
    }
}
