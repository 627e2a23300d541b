//! Persistence adapters.

mod file_credential_store;

pub use file_credential_store::{ENV_CREDENTIALS_PATH, FileCredentialStore};
