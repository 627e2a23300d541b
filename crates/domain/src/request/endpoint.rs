//! Endpoint descriptor
//!
//! An [`Endpoint`] names one API call: where it goes, which method it uses,
//! what JSON object it carries and whether it needs the session token. It is
//! built per call and handed to the request engine; nothing here performs I/O.

use serde::Serialize;
use serde_json::{Map, Value};

use super::HttpMethod;
use crate::error::{DomainError, DomainResult};

/// Immutable description of a single API request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    query: Option<String>,
    method: HttpMethod,
    body: Option<Map<String, Value>>,
    requires_auth: bool,
}

impl Endpoint {
    /// Creates an authenticated endpoint without body or query.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
            method,
            body: None,
            requires_auth: true,
        }
    }

    /// Creates a GET endpoint.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST endpoint.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT endpoint.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a DELETE endpoint.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Creates a HEAD endpoint.
    #[must_use]
    pub fn head(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Head, path)
    }

    /// Creates an upload endpoint. Uploads default to POST.
    #[must_use]
    pub fn upload(path: impl Into<String>) -> Self {
        Self::post(path)
    }

    /// Marks the endpoint as public: no bearer token is attached.
    #[must_use]
    pub fn without_auth(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    /// Attaches a JSON body.
    ///
    /// Fields skipped by the body's `Serialize` impl (typically `None`
    /// options) never reach the wire.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] if the value cannot be serialized
    /// or does not serialize to a JSON object.
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> DomainResult<Self> {
        match serde_json::to_value(body) {
            Ok(Value::Object(map)) => {
                self.body = Some(map);
                Ok(self)
            }
            Ok(other) => Err(DomainError::InvalidBody(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
            Err(e) => Err(DomainError::InvalidBody(e.to_string())),
        }
    }

    /// Attaches url-encoded query parameters.
    ///
    /// An empty encoding leaves the endpoint without a query string.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidQuery`] if the value cannot be encoded.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, query: &Q) -> DomainResult<Self> {
        let encoded = serde_urlencoded::to_string(query)
            .map_err(|e| DomainError::InvalidQuery(e.to_string()))?;
        self.query = (!encoded.is_empty()).then_some(encoded);
        Ok(self)
    }

    /// Returns the path relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the encoded query string, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the path followed by `?query` when a query is present.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{query}", self.path),
            None => self.path.clone(),
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref()
    }

    /// Returns whether the session token should be attached.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
