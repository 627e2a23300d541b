//! `multipart/form-data` payload builder.
//!
//! Uploads are sent as a single pre-built buffer rather than a streamed form,
//! so the exact bytes are known before the one and only attempt is made.
//!
//! Framing per part:
//!
//! ```text
//! --<boundary>\r\n
//! Content-Disposition: form-data; name="<name>"[; filename="<filename>"]\r\n
//! [Content-Type: <content type>\r\n]
//! \r\n
//! <bytes>\r\n
//! ```
//!
//! followed by the closing `--<boundary>--\r\n`.

use rand::Rng;
use rand::distr::Alphanumeric;

const BOUNDARY_PREFIX: &str = "Boundary-";
const BOUNDARY_RANDOM_LEN: usize = 32;

/// One named part of a multipart payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPart {
    /// Form field name.
    pub name: String,
    /// File name, present only for file parts.
    pub filename: Option<String>,
    /// Content type, emitted only for file parts.
    pub content_type: Option<String>,
    /// Raw part content.
    pub value: Vec<u8>,
}

impl MultipartPart {
    /// Creates a plain text field.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: None,
            value: value.into().into_bytes(),
        }
    }

    /// Creates a file part.
    #[must_use]
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: Some(filename.into()),
            content_type: Some(content_type.into()),
            value: value.into(),
        }
    }

    /// Returns true if this part carries a file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        self.filename.is_some()
    }

    fn write_to(&self, boundary: &str, out: &mut Vec<u8>) {
        out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());

        let mut disposition = format!(
            "Content-Disposition: form-data; name=\"{}\"",
            escape_quoted(&self.name)
        );
        if let Some(filename) = &self.filename {
            disposition.push_str(&format!("; filename=\"{}\"", escape_quoted(filename)));
        }
        disposition.push_str("\r\n");
        out.extend_from_slice(disposition.as_bytes());

        if self.is_file() {
            if let Some(content_type) = &self.content_type {
                out.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
            }
        }

        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&self.value);
        out.extend_from_slice(b"\r\n");
    }
}

/// Ordered multipart payload with its boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<MultipartPart>,
}

impl MultipartForm {
    /// Creates an empty form with a freshly generated random boundary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_boundary(generate_boundary())
    }

    /// Creates an empty form with a fixed boundary.
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// Appends a text field.
    #[must_use]
    pub fn text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.part(MultipartPart::text(name, value))
    }

    /// Appends a file part.
    #[must_use]
    pub fn file(
        self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        self.part(MultipartPart::file(name, filename, content_type, value))
    }

    /// Appends an arbitrary part.
    #[must_use]
    pub fn part(mut self, part: MultipartPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Returns the boundary token.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Returns the parts in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    /// Returns the `Content-Type` header value announcing the boundary.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("{}; boundary={}", mime::MULTIPART_FORM_DATA, self.boundary)
    }

    /// Serializes all parts into one buffer terminated by the closing
    /// boundary marker.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let capacity = self
            .parts
            .iter()
            .map(|p| p.value.len() + p.name.len() + 128)
            .sum::<usize>()
            + self.boundary.len()
            + 8;
        let mut out = Vec::with_capacity(capacity);

        for part in &self.parts {
            part.write_to(&self.boundary, &mut out);
        }
        out.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        out
    }

    /// Consumes the form, returning the encoded body and its content type.
    #[must_use]
    pub fn into_body(self) -> (Vec<u8>, String) {
        let content_type = self.content_type();
        (self.encode(), content_type)
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a random boundary token such as `Boundary-3fK9...`.
#[must_use]
pub fn generate_boundary() -> String {
    let random: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("{BOUNDARY_PREFIX}{random}")
}

/// Percent-encodes the characters that would break a quoted header
/// parameter.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
