//! Credential store port
//!
//! Secure storage for the single session token. Implementations must make
//! each operation atomic; the request engine reads the token on every
//! request and never writes it.

use thiserror::Error;

/// Errors that can occur during credential store operations.
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform keystore reported a failure.
    #[error("credential backend error: {0}")]
    Backend(String),
}

/// Secure get/set/delete of one bearer token.
///
/// The methods are synchronous and the engine calls [`CredentialStore::load`]
/// from async code on every authenticated request, so implementations must be
/// cheap: a small local file or an in-memory value, never a network round
/// trip.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored token, or `None` if there is no session.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn load(&self) -> Result<Option<String>, CredentialStoreError>;

    /// Replaces the stored token.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn save(&self, token: &str) -> Result<(), CredentialStoreError>;

    /// Removes the stored token. Deleting a missing token succeeds.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn delete(&self) -> Result<(), CredentialStoreError>;
}
