//! Gigboard Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod files;
pub mod persistence;

pub use adapters::ReqwestTransport;
pub use files::read_upload_file;
pub use persistence::{ENV_CREDENTIALS_PATH, FileCredentialStore};
