//! Gigboard Application - Request engine, session handling and ports
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP transport, credential store)
//! - The request engine with retry, auth and error classification
//! - Session invalidation and the authentication state holder
//! - The typed endpoint facade

pub mod api;
pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod ports;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{GigboardApi, UploadFile};
pub use auth::{
    AuthSession, InMemoryCredentialStore, SessionEpoch, SessionNotifier, SessionObserver,
    SessionState,
};
pub use config::{ConfigError, EngineConfig};
pub use engine::RequestEngine;
pub use error::{ApiError, ApiResult};
pub use ports::{
    CancellationReceiver, CancellationToken, CredentialStore, CredentialStoreError, HttpTransport,
    TransportError, TransportRequest,
};
