//! Shapes shared by many endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Simple acknowledgement returned by write and upload endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ack {
    /// Whether the server accepted the operation.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Optional human-readable note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Identifier of the created resource, when one was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Location of an uploaded file, for upload endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

const fn default_success() -> bool {
    true
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Maximum items per page.
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Returns true if more pages follow this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total
    }
}

/// Structured error body sent with 4xx/5xx responses.
///
/// The API reports failures as `{"detail": "..."}`. Validation failures send
/// `detail` as a list of `{"msg": "..."}` objects, and a few legacy endpoints
/// use `message` or `error` instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

impl ErrorBody {
    /// Extracts the human-readable message from a raw error body.
    ///
    /// Returns `None` when the body is not JSON, is not an object, or
    /// carries no usable message.
    #[must_use]
    pub fn detail_from_slice(bytes: &[u8]) -> Option<String> {
        serde_json::from_slice::<Self>(bytes)
            .ok()
            .and_then(Self::into_detail)
    }

    /// Returns the best available message: `detail`, then `message`, then
    /// `error`. Fields that are not strings or are blank are skipped.
    #[must_use]
    pub fn into_detail(self) -> Option<String> {
        let detail = match self.detail {
            Some(Value::String(s)) => Some(s),
            Some(Value::Array(items)) => {
                let joined = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.as_str()),
                        Value::Object(map) => map.get("msg").and_then(Value::as_str),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                (!joined.is_empty()).then_some(joined)
            }
            _ => None,
        };

        let usable = |s: &String| !s.trim().is_empty();
        let text = |value: Option<Value>| match value {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        detail
            .filter(usable)
            .or_else(|| text(self.message).filter(usable))
            .or_else(|| text(self.error).filter(usable))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detail_string_is_verbatim() {
        let detail = ErrorBody::detail_from_slice(br#"{"detail": "Job is no longer open."}"#);
        assert_eq!(detail.as_deref(), Some("Job is no longer open."));
    }

    #[test]
    fn test_validation_list_is_joined() {
        let body = br#"{"detail": [{"loc": ["body", "email"], "msg": "invalid email"}, {"msg": "password too short"}]}"#;
        assert_eq!(
            ErrorBody::detail_from_slice(body).as_deref(),
            Some("invalid email; password too short")
        );
    }

    #[test]
    fn test_fallback_fields() {
        assert_eq!(
            ErrorBody::detail_from_slice(br#"{"message": "Rate limited"}"#).as_deref(),
            Some("Rate limited")
        );
        assert_eq!(
            ErrorBody::detail_from_slice(br#"{"error": "bad_token"}"#).as_deref(),
            Some("bad_token")
        );
    }

    #[test]
    fn test_structured_siblings_keep_the_detail() {
        assert_eq!(
            ErrorBody::detail_from_slice(br#"{"detail": "Shift full", "error": {"code": "shift_full"}}"#)
                .as_deref(),
            Some("Shift full")
        );
        assert_eq!(
            ErrorBody::detail_from_slice(br#"{"detail": "Job is no longer open.", "error": true}"#)
                .as_deref(),
            Some("Job is no longer open.")
        );
        assert_eq!(
            ErrorBody::detail_from_slice(br#"{"message": 503, "error": "maintenance"}"#).as_deref(),
            Some("maintenance")
        );
    }

    #[test]
    fn test_blank_detail_falls_back() {
        assert_eq!(
            ErrorBody::detail_from_slice(br#"{"detail": "  ", "message": "Rate limited"}"#)
                .as_deref(),
            Some("Rate limited")
        );
        assert_eq!(
            ErrorBody::detail_from_slice(br#"{"detail": [], "message": "", "error": "bad_token"}"#)
                .as_deref(),
            Some("bad_token")
        );
    }

    #[test]
    fn test_unusable_bodies() {
        assert_eq!(ErrorBody::detail_from_slice(b"<html>502</html>"), None);
        assert_eq!(ErrorBody::detail_from_slice(b"[]"), None);
        assert_eq!(ErrorBody::detail_from_slice(br#"{"detail": 42}"#), None);
        assert_eq!(ErrorBody::detail_from_slice(br#"{"detail": "  "}"#), None);
        assert_eq!(ErrorBody::detail_from_slice(b""), None);
    }

    #[test]
    fn test_ack_defaults() {
        let ack: Ack = serde_json::from_str("{}").unwrap();
        assert!(ack.success);
        assert_eq!(ack.message, None);

        let ack: Ack =
            serde_json::from_str(r#"{"success": true, "url": "https://cdn/x.jpg"}"#).unwrap();
        assert_eq!(ack.url.as_deref(), Some("https://cdn/x.jpg"));
    }

    #[test]
    fn test_page_has_next() {
        let page = Page::<u8> {
            items: vec![],
            total: 45,
            page: 2,
            page_size: 20,
        };
        assert!(page.has_next());

        let last = Page::<u8> { page: 3, ..page };
        assert!(!last.has_next());
    }
}
