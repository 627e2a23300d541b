//! Gigboard Domain - Core types
//!
//! This crate defines the transport-independent model of the Gigboard API
//! client: endpoint descriptors, raw responses, multipart payloads, error
//! categories and the marketplace data shapes exchanged with the server.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod error_kind;
pub mod id;
pub mod models;
pub mod multipart;
pub mod request;
pub mod response;

pub use error::{DomainError, DomainResult};
pub use error_kind::{ApiErrorKind, Locale};
pub use id::generate_idempotency_key;
pub use multipart::{MultipartForm, MultipartPart};
pub use request::{Endpoint, HttpMethod};
pub use response::{ResponseSpec, StatusCode};
