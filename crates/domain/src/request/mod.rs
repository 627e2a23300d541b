//! HTTP Request domain types

mod endpoint;
mod method;

pub use endpoint::Endpoint;
pub use method::HttpMethod;
