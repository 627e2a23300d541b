//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port. It performs exactly one
//! exchange per call; retries, auth and status classification stay in the
//! request engine.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use gigboard_application::config::EngineConfig;
use gigboard_application::ports::{HttpTransport, TransportError, TransportRequest};
use gigboard_domain::{HttpMethod, ResponseSpec};
use reqwest::{Client, Method};
use tracing::trace;

/// Maximum number of redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// HTTP transport backed by a shared `reqwest::Client`.
///
/// The client keeps a connection pool, so one instance should be created at
/// startup and shared.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport with the timeouts and user agent from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(config: &EngineConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout: config.request_timeout,
        })
    }

    /// Creates a transport around a preconfigured client.
    #[must_use]
    pub const fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn map_error(error: &reqwest::Error, timeout: Duration) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return TransportError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return TransportError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(url::Url::port_or_known_default)
                        .unwrap_or(443),
                };
            }
            if lower.contains("certificate") || lower.contains("tls") {
                return TransportError::TlsError(message);
            }
            return TransportError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return TransportError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_body() || error.is_decode() {
            return TransportError::BodyRead(error_chain(error));
        }

        TransportError::Other(error_chain(error))
    }
}

/// Flattens an error and its sources into one line; reqwest hides the useful
/// part (DNS, TLS, refused) in the source chain.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: &TransportRequest,
    ) -> impl Future<Output = Result<ResponseSpec, TransportError>> + Send {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        let timeout = self.timeout;

        async move {
            let start = Instant::now();

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout))?;

            let status = response.status().as_u16();
            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::BodyRead(error_chain(&e)))?
                .to_vec();

            let duration = start.elapsed();
            trace!(status, bytes = body.len(), ?duration, "exchange complete");

            Ok(ResponseSpec::new(status, headers, body, duration))
        }
    }
}
