//! Command-line error type.

use gigboard_application::{ApiError, ConfigError, CredentialStoreError, TransportError};
use gigboard_domain::Locale;
use thiserror::Error;

/// Anything that can stop a command.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be created.
    #[error("could not start the HTTP client: {0}")]
    Transport(#[from] TransportError),

    /// An API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session token could not be read or written.
    #[error("credential storage error: {0}")]
    Credentials(#[from] CredentialStoreError),

    /// A local file could not be read.
    #[error("{path}: {source}")]
    File {
        /// The file that was requested.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No place to keep the session token was found.
    #[error("no data directory available; set GIGBOARD_CREDENTIALS_PATH")]
    NoCredentialsLocation,

    /// The command needs a signed-in user.
    #[error("not signed in; run `gigboard login` first")]
    NotSignedIn,

    /// The user pressed Ctrl-C.
    #[error("interrupted")]
    Interrupted,
}

impl AppError {
    /// Returns the message to print, localized for API failures.
    #[must_use]
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            Self::Api(error) => error.user_message(locale),
            other => other.to_string(),
        }
    }
}
