//! Job applications.

use gigboard_domain::Endpoint;
use gigboard_domain::models::{ApplyRequest, JobApplication, Page};

use super::{GigboardApi, segment};
use crate::error::ApiResult;
use crate::ports::HttpTransport;

impl<T: HttpTransport> GigboardApi<T> {
    /// Applies to a job.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn apply(&self, job_id: &str, application: &ApplyRequest) -> ApiResult<JobApplication> {
        let id = segment(job_id)?;
        self.fetch(Endpoint::post(format!("/jobs/{id}/applications")).with_json(application)?)
            .await
    }

    /// Lists the worker's applications, newest first.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn my_applications(&self) -> ApiResult<Page<JobApplication>> {
        self.fetch(Endpoint::get("/applications")).await
    }

    /// Withdraws a pending application.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn withdraw_application(&self, application_id: &str) -> ApiResult<()> {
        let id = segment(application_id)?;
        self.send(Endpoint::delete(format!("/applications/{id}")))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::test_support::{Harness, Step};
    use gigboard_domain::models::ApplicationStatus;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_apply() {
        let harness = Harness::with_token(
            [Step::json(
                201,
                r#"{"id": "a1", "job_id": "j1", "job_title": "Line cook", "status": "pending",
                    "cover_message": "Available weekends", "shift_ids": ["s1"],
                    "applied_at": "2026-03-01T09:00:00Z"}"#,
            )],
            "tok",
        );
        let request = ApplyRequest {
            cover_message: Some("Available weekends".to_string()),
            shift_ids: vec!["s1".to_string()],
        };

        let application = harness.api().apply("j1", &request).await.unwrap();

        assert_eq!(application.status, ApplicationStatus::Pending);
        assert_eq!(application.shift_ids, request.shift_ids);
        assert_eq!(
            harness.transport.last_request().url.path(),
            "/v1/jobs/j1/applications"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_is_never_retried() {
        let harness = Harness::with_token([Step::status(500), Step::status(201)], "tok");

        let result = harness
            .api()
            .apply("j1", &ApplyRequest::default())
            .await;

        assert!(matches!(result, Err(ApiError::ServerFailure(_))));
        assert_eq!(harness.transport.attempts(), 1);
    }

    #[tokio::test]
    async fn test_withdraw_application() {
        let harness = Harness::with_token([Step::status(204)], "tok");

        harness.api().withdraw_application("a1").await.unwrap();

        assert_eq!(harness.transport.last_request().url.path(), "/v1/applications/a1");
    }
}
