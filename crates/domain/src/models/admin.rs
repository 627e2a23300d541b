//! Staff-only shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DocumentKind;

/// An identity document waiting for staff review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingVerification {
    /// Verification id.
    pub id: String,
    /// Worker who submitted the document.
    pub user_id: String,
    /// Document type.
    pub document_kind: DocumentKind,
    /// Submission time.
    pub submitted_at: DateTime<Utc>,
}
