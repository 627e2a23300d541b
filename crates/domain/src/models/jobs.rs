//! Job listing shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contract type of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// A single shift.
    Shift,
    /// Part-time position.
    PartTime,
    /// Full-time position.
    FullTime,
    /// Fixed-term contract.
    Temporary,
}

/// Unit a wage amount is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WagePeriod {
    /// Per hour worked.
    Hour,
    /// Per shift.
    Shift,
    /// Per month.
    Month,
}

/// Advertised pay. Computed server-side; the client only displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wage {
    /// Amount in minor currency units.
    pub amount_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// What the amount is quoted per.
    pub period: WagePeriod,
}

/// Job as shown in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    /// Job id.
    pub id: String,
    /// Job title.
    pub title: String,
    /// Hiring company name.
    pub company_name: String,
    /// City or area.
    pub location: String,
    /// Contract type.
    pub employment_type: EmploymentType,
    /// Advertised pay.
    pub wage: Wage,
    /// When the first shift starts.
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    /// Whether the signed-in worker saved this job.
    #[serde(default)]
    pub is_favorite: bool,
}

/// Full job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetail {
    /// Summary fields.
    #[serde(flatten)]
    pub summary: JobSummary,
    /// Long description.
    pub description: String,
    /// Required qualifications, by name.
    #[serde(default)]
    pub required_qualifications: Vec<String>,
    /// When the last shift ends.
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    /// Remaining open positions.
    #[serde(default)]
    pub openings: u32,
    /// Whether the signed-in worker already applied.
    #[serde(default)]
    pub has_applied: bool,
}

/// Search filters, passed through untouched as query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobSearchQuery {
    /// Free-text search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Restrict to a city or area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Restrict to a contract type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<EmploymentType>,
    /// Minimum hourly wage in minor units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_wage_cents: Option<i64>,
    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_job_detail_with_flattened_summary() {
        let json = r#"{
            "id": "j1",
            "title": "Line cook",
            "company_name": "Casa Lola",
            "location": "Madrid",
            "employment_type": "part_time",
            "wage": {"amount_cents": 1250, "currency": "EUR", "period": "hour"},
            "description": "Evenings and weekends.",
            "required_qualifications": ["Food hygiene"],
            "openings": 2
        }"#;
        let detail: JobDetail = serde_json::from_str(json).unwrap();

        assert_eq!(detail.summary.employment_type, EmploymentType::PartTime);
        assert_eq!(detail.summary.wage.period, WagePeriod::Hour);
        assert_eq!(detail.openings, 2);
        assert!(!detail.has_applied);
        assert_eq!(detail.summary.starts_at, None);
    }

    #[test]
    fn test_search_query_encoding_skips_absent_filters() {
        let query = JobSearchQuery {
            q: Some("barista".to_string()),
            employment_type: Some(EmploymentType::Shift),
            page: Some(1),
            ..JobSearchQuery::default()
        };
        let encoded = serde_urlencoded::to_string(&query).unwrap();
        assert_eq!(encoded, "q=barista&employment_type=shift&page=1");
    }
}
