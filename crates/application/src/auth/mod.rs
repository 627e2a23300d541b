//! Authentication module for the Gigboard API client.
//!
//! This module provides:
//! - The process-wide session invalidation notifier
//! - The authentication state holder that reacts to it
//! - In-memory token storage

mod memory_store;
mod notifier;
mod session;

pub use memory_store::InMemoryCredentialStore;
pub use notifier::{FnObserver, SessionEpoch, SessionNotifier, SessionObserver, SubscriptionId};
pub use session::{AuthSession, SessionState};
