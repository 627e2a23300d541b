//! Response specification type
//!
//! Contains the raw result of one HTTP attempt: status, headers, body bytes
//! and timing. Classification and decoding happen in the request engine.

use std::collections::HashMap;
use std::time::Duration;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// 401 Unauthorized.
    pub const UNAUTHORIZED: Self = Self(401);

    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true for 2xx and 3xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 < 400
    }

    /// Returns true for 401.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.0 == Self::UNAUTHORIZED.0
    }

    /// Returns true if this is a 4xx client error status.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true for any status at or above 500.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.0 >= 500
    }

    /// Returns the canonical reason phrase, if the code is a common one.
    #[must_use]
    pub const fn reason_phrase(&self) -> Option<&'static str> {
        Some(match self.0 {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            410 => "Gone",
            413 => "Payload Too Large",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => return None,
        })
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason_phrase() {
            Some(phrase) => write!(f, "{} {phrase}", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Raw HTTP response as produced by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers, names lowercased by the transport.
    pub headers: HashMap<String, String>,
    /// Response body as raw bytes.
    pub body: Vec<u8>,
    /// Time from sending the request to reading the full body.
    pub duration: Duration,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        Self {
            status: status.into(),
            headers,
            body,
            duration,
        }
    }

    /// Creates a response with a status and body only. Mostly useful for
    /// test transports.
    #[must_use]
    pub fn with_body(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, HashMap::new(), body.into(), Duration::ZERO)
    }

    /// Returns the Content-Type header, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true when the body carries no content beyond whitespace.
    #[must_use]
    pub fn is_body_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Returns the body as a lossy UTF-8 string.
    #[must_use]
    pub fn body_as_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns the response size in bytes.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn size(&self) -> usize {
        self.body.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_classes() {
        assert!(StatusCode::new(204).is_success());
        assert!(StatusCode::new(302).is_success());
        assert!(StatusCode::new(401).is_unauthorized());
        assert!(StatusCode::new(404).is_client_error());
        assert!(!StatusCode::new(404).is_server_error());
        assert!(StatusCode::new(503).is_server_error());
        assert!(StatusCode::new(599).is_server_error());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StatusCode::new(503).to_string(), "503 Service Unavailable");
        assert_eq!(StatusCode::new(410).to_string(), "410 Gone");
        assert_eq!(StatusCode::new(418).to_string(), "418");
        assert_eq!(StatusCode::new(599).to_string(), "599");
    }

    #[test]
    fn test_content_type_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let response = ResponseSpec::new(200, headers, vec![], Duration::ZERO);
        assert_eq!(response.content_type(), Some("application/json"));
    }

    #[test]
    fn test_whitespace_body_is_empty() {
        assert!(ResponseSpec::with_body(204, Vec::new()).is_body_empty());
        assert!(ResponseSpec::with_body(200, " \r\n").is_body_empty());
        assert!(!ResponseSpec::with_body(200, "{}").is_body_empty());
    }
}
