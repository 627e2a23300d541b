//! Job search and favorites.

use gigboard_domain::Endpoint;
use gigboard_domain::models::{JobDetail, JobSearchQuery, JobSummary, Page};

use super::{GigboardApi, segment};
use crate::error::ApiResult;
use crate::ports::HttpTransport;

impl<T: HttpTransport> GigboardApi<T> {
    /// Searches open jobs. Unset filters are left out of the query string.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn search_jobs(&self, query: &JobSearchQuery) -> ApiResult<Page<JobSummary>> {
        self.fetch(Endpoint::get("/jobs").without_auth().with_query(query)?)
            .await
    }

    /// Returns one job.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn job(&self, job_id: &str) -> ApiResult<JobDetail> {
        let id = segment(job_id)?;
        self.fetch(Endpoint::get(format!("/jobs/{id}")).without_auth())
            .await
    }

    /// Succeeds if the job is still listed. Cheaper than [`Self::job`] when
    /// only existence matters.
    ///
    /// # Errors
    /// Returns `ServerFailure` for a job that is gone, or any other
    /// classified request failure.
    pub async fn job_exists(&self, job_id: &str) -> ApiResult<()> {
        let id = segment(job_id)?;
        self.send(Endpoint::head(format!("/jobs/{id}")).without_auth())
            .await
    }

    /// Lists jobs the worker has saved.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn favorite_jobs(&self) -> ApiResult<Vec<JobSummary>> {
        self.fetch(Endpoint::get("/jobs/favorites")).await
    }

    /// Saves a job.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn add_favorite(&self, job_id: &str) -> ApiResult<()> {
        let id = segment(job_id)?;
        self.send(Endpoint::post(format!("/jobs/{id}/favorite"))).await
    }

    /// Removes a saved job.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn remove_favorite(&self, job_id: &str) -> ApiResult<()> {
        let id = segment(job_id)?;
        self.send(Endpoint::delete(format!("/jobs/{id}/favorite")))
            .await
    }
}
