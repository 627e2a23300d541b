//! Job application shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application submitted for a job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplyRequest {
    /// Optional note to the employer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_message: Option<String>,
    /// Specific shift ids, for jobs made of several shifts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shift_ids: Vec<String>,
}

/// Where an application stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Waiting for the employer.
    Pending,
    /// Accepted by the employer.
    Accepted,
    /// Declined by the employer.
    Rejected,
    /// Withdrawn by the worker.
    Withdrawn,
}

/// A worker's application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    /// Application id.
    pub id: String,
    /// Job applied for.
    pub job_id: String,
    /// Job title at the time of applying.
    pub job_title: String,
    /// Current status.
    pub status: ApplicationStatus,
    /// Note sent with the application.
    #[serde(default)]
    pub cover_message: Option<String>,
    /// Shifts applied for.
    #[serde(default)]
    pub shift_ids: Vec<String>,
    /// Submission time.
    pub applied_at: DateTime<Utc>,
}
