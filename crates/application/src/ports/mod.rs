//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the request engine and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod credential_store;
mod http_transport;

pub use credential_store::{CredentialStore, CredentialStoreError};
pub use http_transport::{
    CancellationReceiver, CancellationToken, HttpTransport, TransportError, TransportRequest,
};
