//! Startup wiring: one engine, one session, one facade.

use std::sync::Arc;

use gigboard_application::{AuthSession, EngineConfig, GigboardApi, RequestEngine, SessionNotifier};
use gigboard_infrastructure::{FileCredentialStore, ReqwestTransport};
use tracing::debug;

use crate::error::AppError;

/// Everything a command needs.
pub struct AppContext {
    /// Endpoint facade.
    pub api: GigboardApi<ReqwestTransport>,
    /// Signed-in state, kept in sync with 401 responses.
    pub session: Arc<AuthSession>,
}

impl AppContext {
    /// Builds the context from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn from_env() -> Result<Self, AppError> {
        let config = EngineConfig::from_env()?;
        let path = FileCredentialStore::default_location().ok_or(AppError::NoCredentialsLocation)?;
        debug!(base_url = %config.base_url, credentials = %path.display(), "starting");

        let credentials = Arc::new(FileCredentialStore::new(path));
        let notifier = Arc::new(SessionNotifier::new());
        let session = AuthSession::restore(credentials.clone(), Arc::clone(&notifier));

        let transport = Arc::new(ReqwestTransport::new(&config)?);
        let engine = RequestEngine::new(config, transport, credentials, notifier)?;

        Ok(Self {
            api: GigboardApi::new(Arc::new(engine)),
            session,
        })
    }

    /// Fails unless a session token is held.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotSignedIn`] when logged out.
    pub fn require_session(&self) -> Result<(), AppError> {
        if self.session.is_logged_in() {
            Ok(())
        } else {
            Err(AppError::NotSignedIn)
        }
    }
}
