//! Authentication state holder.
//!
//! `AuthSession` owns the signed-in/signed-out state the rest of the app
//! reads. It writes the credential store on sign-in and sign-out, and
//! subscribes to the [`SessionNotifier`] so a 401 anywhere logs the user out.

use std::sync::{Arc, PoisonError, RwLock};

use gigboard_domain::models::AuthTokens;
use tracing::{info, warn};

use super::notifier::{SessionNotifier, SessionObserver};
use crate::ports::{CredentialStore, CredentialStoreError};

/// Whether a user is signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session token is held.
    #[default]
    LoggedOut,
    /// A session token is held.
    LoggedIn {
        /// Whether the account has staff privileges.
        is_admin: bool,
    },
}

impl SessionState {
    /// Returns true when signed in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }

    /// Returns true when signed in with staff privileges.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::LoggedIn { is_admin: true })
    }
}

/// Process-wide authentication state.
pub struct AuthSession {
    credentials: Arc<dyn CredentialStore>,
    notifier: Arc<SessionNotifier>,
    state: RwLock<SessionState>,
}

impl AuthSession {
    /// Creates the holder, restoring `LoggedIn` if the store already holds a
    /// token, and subscribes it to invalidation signals.
    ///
    /// A restored session is not known to be an admin session until
    /// [`AuthSession::set_admin`] is called with fresh account data.
    pub fn restore(
        credentials: Arc<dyn CredentialStore>,
        notifier: Arc<SessionNotifier>,
    ) -> Arc<Self> {
        let state = match credentials.load() {
            Ok(Some(_)) => {
                notifier.session_established();
                SessionState::LoggedIn { is_admin: false }
            }
            Ok(None) => SessionState::LoggedOut,
            Err(e) => {
                warn!(error = %e, "could not read stored session, starting logged out");
                SessionState::LoggedOut
            }
        };

        let session = Arc::new(Self {
            credentials,
            notifier: Arc::clone(&notifier),
            state: RwLock::new(state),
        });
        notifier.subscribe(Arc::new(Arc::downgrade(&session)));
        session
    }

    /// Stores the token from a successful login or registration.
    ///
    /// # Errors
    /// Returns an error if the token cannot be persisted; the state is left
    /// unchanged in that case.
    pub fn sign_in(&self, tokens: &AuthTokens) -> Result<(), CredentialStoreError> {
        self.credentials.save(&tokens.access_token)?;
        self.set_state(SessionState::LoggedIn {
            is_admin: tokens.user.is_admin,
        });
        self.notifier.session_established();
        info!(is_admin = tokens.user.is_admin, "signed in");
        Ok(())
    }

    /// Discards the token and moves to `LoggedOut`.
    ///
    /// # Errors
    /// Returns an error if the token cannot be deleted. The state still moves
    /// to `LoggedOut`.
    pub fn sign_out(&self) -> Result<(), CredentialStoreError> {
        self.set_state(SessionState::LoggedOut);
        info!("signed out");
        self.credentials.delete()
    }

    /// Updates the admin flag of the current session, e.g. after fetching
    /// the account. Ignored while logged out.
    pub fn set_admin(&self, is_admin: bool) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.is_logged_in() {
            *state = SessionState::LoggedIn { is_admin };
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns true when signed in.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state().is_logged_in()
    }

    /// Returns true when signed in with staff privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state().is_admin()
    }

    fn set_state(&self, new_state: SessionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = new_state;
    }
}

impl SessionObserver for AuthSession {
    fn on_session_invalidated(&self) {
        self.set_state(SessionState::LoggedOut);
        if let Err(e) = self.credentials.delete() {
            warn!(error = %e, "failed to discard invalidated session token");
        }
        info!("logged out after session invalidation");
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::InMemoryCredentialStore;
    use chrono::{TimeZone, Utc};
    use gigboard_domain::models::User;
    use pretty_assertions::assert_eq;

    fn tokens(is_admin: bool) -> AuthTokens {
        AuthTokens {
            access_token: "tok_new".to_string(),
            token_type: "bearer".to_string(),
            user: User {
                id: "u1".to_string(),
                email: "ana@example.com".to_string(),
                first_name: "Ana".to_string(),
                last_name: "Ruiz".to_string(),
                is_admin,
                is_verified: true,
                created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            },
        }
    }

    #[test]
    fn test_restore_without_token() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let session = AuthSession::restore(store, Arc::new(SessionNotifier::new()));
        assert_eq!(session.state(), SessionState::LoggedOut);
    }

    #[test]
    fn test_restore_with_token() {
        let store = Arc::new(InMemoryCredentialStore::with_token("tok_saved"));
        let notifier = Arc::new(SessionNotifier::new());
        let session = AuthSession::restore(store, Arc::clone(&notifier));

        assert_eq!(session.state(), SessionState::LoggedIn { is_admin: false });
        assert_eq!(notifier.observer_count(), 1);

        session.set_admin(true);
        assert!(session.is_admin());
    }

    #[test]
    fn test_sign_in_saves_token_and_admin_flag() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let session = AuthSession::restore(store.clone(), Arc::new(SessionNotifier::new()));

        session.sign_in(&tokens(true)).unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some("tok_new"));
        assert_eq!(session.state(), SessionState::LoggedIn { is_admin: true });
    }

    #[test]
    fn test_invalidation_discards_token_and_admin_flag() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let notifier = Arc::new(SessionNotifier::new());
        let session = AuthSession::restore(store.clone(), Arc::clone(&notifier));
        session.sign_in(&tokens(true)).unwrap();

        assert!(notifier.notify_session_invalidated());

        assert_eq!(session.state(), SessionState::LoggedOut);
        assert!(!session.is_admin());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_sign_in_rearms_after_invalidation() {
        let store = Arc::new(InMemoryCredentialStore::new());
        let notifier = Arc::new(SessionNotifier::new());
        let session = AuthSession::restore(store, Arc::clone(&notifier));

        notifier.notify_session_invalidated();
        assert!(!notifier.is_armed());

        session.sign_in(&tokens(false)).unwrap();
        assert!(notifier.is_armed());
    }

    #[test]
    fn test_sign_out() {
        let store = Arc::new(InMemoryCredentialStore::with_token("tok"));
        let session = AuthSession::restore(store.clone(), Arc::new(SessionNotifier::new()));

        session.sign_out().unwrap();

        assert!(!session.is_logged_in());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_set_admin_ignored_while_logged_out() {
        let session = AuthSession::restore(
            Arc::new(InMemoryCredentialStore::new()),
            Arc::new(SessionNotifier::new()),
        );
        session.set_admin(true);
        assert_eq!(session.state(), SessionState::LoggedOut);
    }
}
