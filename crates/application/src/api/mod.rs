//! Typed endpoint facade
//!
//! One method per API operation. Every method builds an [`Endpoint`] and
//! hands it to the shared [`RequestEngine`]; none of them talk to the
//! transport directly.

mod admin;
mod applications;
mod auth;
mod jobs;
mod profile;
mod wallet;

use std::sync::Arc;

use gigboard_domain::{Endpoint, MultipartForm};
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::engine::RequestEngine;
use crate::error::{ApiError, ApiResult};
use crate::ports::HttpTransport;

/// A file picked by the user, ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Name reported to the server.
    pub filename: String,
    /// MIME type of the bytes.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Creates an upload file.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Gigboard API client.
pub struct GigboardApi<T: HttpTransport> {
    engine: Arc<RequestEngine<T>>,
}

impl<T: HttpTransport> Clone for GigboardApi<T> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<T: HttpTransport> GigboardApi<T> {
    /// Wraps an engine.
    pub const fn new(engine: Arc<RequestEngine<T>>) -> Self {
        Self { engine }
    }

    /// Returns the underlying engine, e.g. to issue a cancellable request.
    #[must_use]
    pub const fn engine(&self) -> &Arc<RequestEngine<T>> {
        &self.engine
    }

    async fn fetch<R: DeserializeOwned>(&self, endpoint: Endpoint) -> ApiResult<R> {
        self.engine.request(&endpoint).await
    }

    /// Sends a request whose response body, if any, is not needed.
    async fn send(&self, endpoint: Endpoint) -> ApiResult<()> {
        self.engine
            .request::<IgnoredAny>(&endpoint)
            .await
            .map(|_| ())
    }

    async fn upload_form<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        form: MultipartForm,
    ) -> ApiResult<R> {
        let (payload, content_type) = form.into_body();
        self.engine.upload(&endpoint, payload, &content_type).await
    }
}

/// Checks that an identifier can be used as a single path segment.
fn segment(id: &str) -> ApiResult<&str> {
    let valid = !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(id)
    } else {
        Err(ApiError::InvalidRequestTarget(format!(
            "'{id}' is not a valid identifier"
        )))
    }
}
