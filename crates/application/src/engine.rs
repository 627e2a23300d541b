//! Request Engine
//!
//! The single path every API call takes: resolve the URL, attach the
//! session token, send through the [`HttpTransport`] port, retry idempotent
//! requests with exponential backoff and classify the outcome into a decoded
//! value or one [`ApiError`].

use std::sync::Arc;

use gigboard_domain::models::ErrorBody;
use gigboard_domain::{Endpoint, ResponseSpec};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::auth::{SessionEpoch, SessionNotifier};
use crate::config::{ConfigError, EngineConfig};
use crate::error::{ApiError, ApiResult};
use crate::ports::{
    CancellationReceiver, CredentialStore, HttpTransport, TransportError, TransportRequest,
};

/// Outcome of a single attempt.
enum Attempt<R> {
    /// Final result; no further attempt may change it.
    Finished(ApiResult<R>),
    /// Failure that an idempotent request may retry.
    Retryable(ApiError),
}

/// Executes API requests against one base URL.
///
/// # Example
///
/// ```ignore
/// let engine = RequestEngine::new(config, transport, credentials, notifier)?;
/// let jobs: Page<JobSummary> = engine.request(&Endpoint::get("/jobs")).await?;
/// ```
pub struct RequestEngine<T: HttpTransport> {
    config: EngineConfig,
    base_url: Url,
    transport: Arc<T>,
    credentials: Arc<dyn CredentialStore>,
    notifier: Arc<SessionNotifier>,
}

impl<T: HttpTransport> RequestEngine<T> {
    /// Creates an engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is invalid.
    pub fn new(
        config: EngineConfig,
        transport: Arc<T>,
        credentials: Arc<dyn CredentialStore>,
        notifier: Arc<SessionNotifier>,
    ) -> Result<Self, ConfigError> {
        let base_url = config.validate()?;
        Ok(Self {
            config,
            base_url,
            transport,
            credentials,
            notifier,
        })
    }

    /// Returns the configuration the engine was built with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the notifier fired on 401 responses.
    #[must_use]
    pub const fn notifier(&self) -> &Arc<SessionNotifier> {
        &self.notifier
    }

    /// Sends a JSON request and decodes the response body into `R`.
    ///
    /// GET and HEAD requests are retried on transport failures and 5xx
    /// responses, waiting 1s then 2s with the default configuration. Other
    /// methods get exactly one attempt.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the last attempt.
    #[instrument(
        name = "api_request",
        skip(self, endpoint),
        fields(method = %endpoint.method(), path = endpoint.path())
    )]
    pub async fn request<R: DeserializeOwned>(&self, endpoint: &Endpoint) -> ApiResult<R> {
        let body = endpoint
            .body()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ApiError::InvalidRequestTarget(e.to_string()))?;
        let epoch = self.notifier.current_epoch();
        let request = self.build(endpoint, mime::APPLICATION_JSON.as_ref(), body)?;
        let idempotent = endpoint.method().is_idempotent();

        let mut retry = 0;
        loop {
            let error = match self.attempt(&request, epoch, retry + 1).await {
                Attempt::Finished(result) => return result,
                Attempt::Retryable(error) => error,
            };

            if !idempotent || retry >= self.config.max_retries {
                return Err(error);
            }

            retry += 1;
            let delay = self.config.backoff_delay(retry);
            warn!(retry, ?delay, error = %error, "request failed, retrying");
            tokio::time::sleep(delay).await;
        }
    }

    /// Like [`RequestEngine::request`], but resolves to
    /// [`ApiError::Cancelled`] as soon as `cancel` fires, whether the request
    /// is waiting for a response or sleeping before a retry.
    ///
    /// # Errors
    ///
    /// Returns the classified failure, or `Cancelled`.
    pub async fn request_with_cancellation<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        mut cancel: CancellationReceiver,
    ) -> ApiResult<R> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ApiError::Cancelled),
            result = self.request(endpoint) => result,
        }
    }

    /// Sends a pre-encoded payload, such as a multipart form, in a single
    /// attempt and decodes the acknowledgement.
    ///
    /// Uploads are never retried, whatever the method.
    ///
    /// # Errors
    ///
    /// Returns the classified failure.
    #[instrument(
        name = "api_upload",
        skip(self, endpoint, payload),
        fields(method = %endpoint.method(), path = endpoint.path(), bytes = payload.len())
    )]
    pub async fn upload<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        payload: Vec<u8>,
        content_type: &str,
    ) -> ApiResult<R> {
        let epoch = self.notifier.current_epoch();
        let request = self.build(endpoint, content_type, Some(payload))?;
        match self.attempt(&request, epoch, 1).await {
            Attempt::Finished(result) => result,
            Attempt::Retryable(error) => Err(error),
        }
    }

    /// Like [`RequestEngine::upload`], with cancellation.
    ///
    /// # Errors
    ///
    /// Returns the classified failure, or `Cancelled`.
    pub async fn upload_with_cancellation<R: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        payload: Vec<u8>,
        content_type: &str,
        mut cancel: CancellationReceiver,
    ) -> ApiResult<R> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ApiError::Cancelled),
            result = self.upload(endpoint, payload, content_type) => result,
        }
    }

    /// Resolves `path_and_query` against the base URL.
    ///
    /// The path is appended to the base as-is, so the result must keep the
    /// base's origin and stay under its path.
    fn resolve(&self, path_and_query: &str) -> ApiResult<Url> {
        if path_and_query
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(ApiError::InvalidRequestTarget(format!(
                "path contains whitespace or control characters: {path_and_query:?}"
            )));
        }

        let base = self.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{base}{path_and_query}"))
            .map_err(|e| ApiError::InvalidRequestTarget(e.to_string()))?;

        let base_path = self.base_url.path().trim_end_matches('/');
        let under_base = url.path() == base_path || url.path().starts_with(&format!("{base_path}/"));
        if url.origin() != self.base_url.origin() || !under_base {
            return Err(ApiError::InvalidRequestTarget(format!(
                "'{path_and_query}' leaves the API base URL"
            )));
        }
        Ok(url)
    }

    fn build(
        &self,
        endpoint: &Endpoint,
        content_type: &str,
        body: Option<Vec<u8>>,
    ) -> ApiResult<TransportRequest> {
        let url = self.resolve(&endpoint.path_and_query())?;

        let mut headers = vec![
            ("Content-Type".to_string(), content_type.to_string()),
            (
                "Accept".to_string(),
                mime::APPLICATION_JSON.as_ref().to_string(),
            ),
        ];
        if endpoint.requires_auth() {
            match self.credentials.load() {
                Ok(Some(token)) => {
                    headers.push(("Authorization".to_string(), format!("Bearer {token}")));
                }
                Ok(None) => debug!("no session token, sending without credentials"),
                Err(e) => {
                    warn!(error = %e, "could not read session token, sending without credentials");
                }
            }
        }

        Ok(TransportRequest {
            method: endpoint.method(),
            url,
            headers,
            body,
        })
    }

    /// Runs one exchange. `epoch` is the session the token in `request`
    /// was read under; a 401 only invalidates that session.
    async fn attempt<R: DeserializeOwned>(
        &self,
        request: &TransportRequest,
        epoch: SessionEpoch,
        number: u32,
    ) -> Attempt<R> {
        debug!(attempt = number, url = %request.url, "sending request");

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(TransportError::Cancelled) => return Attempt::Finished(Err(ApiError::Cancelled)),
            Err(e) => {
                debug!(attempt = number, error = %e, "transport failure");
                return Attempt::Retryable(ApiError::TransportFailure(e));
            }
        };

        let status = response.status;
        debug!(attempt = number, %status, bytes = response.size(), "response received");

        if status.is_unauthorized() {
            self.notifier.notify_session_invalidated_for(epoch);
            return Attempt::Finished(Err(ApiError::Unauthorized));
        }
        if status.is_server_error() {
            return Attempt::Retryable(server_failure(&response));
        }
        if !status.is_success() {
            return Attempt::Finished(Err(server_failure(&response)));
        }
        Attempt::Finished(decode(&response))
    }
}

impl<T: HttpTransport> std::fmt::Debug for RequestEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestEngine")
            .field("base_url", &self.base_url.as_str())
            .field("max_retries", &self.config.max_retries)
            .finish_non_exhaustive()
    }
}

fn server_failure(response: &ResponseSpec) -> ApiError {
    let message = ErrorBody::detail_from_slice(&response.body)
        .unwrap_or_else(|| format!("Server error ({})", response.status));
    ApiError::ServerFailure(message)
}

/// Decodes a success body. An empty body is read as JSON `null`, which only
/// unit and `Option` shapes accept.
fn decode<R: DeserializeOwned>(response: &ResponseSpec) -> ApiResult<R> {
    if response.is_body_empty() {
        return serde_json::from_value(Value::Null).map_err(|_| ApiError::EmptyResponse);
    }
    serde_json::from_slice(&response.body).map_err(|e| ApiError::DecodeFailure(e.to_string()))
}
