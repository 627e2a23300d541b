//! Staff endpoints.

use gigboard_domain::Endpoint;
use gigboard_domain::models::PendingVerification;

use super::GigboardApi;
use crate::error::ApiResult;
use crate::ports::HttpTransport;

impl<T: HttpTransport> GigboardApi<T> {
    /// Lists identity documents waiting for review. Staff accounts only.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn admin_pending_verifications(&self) -> ApiResult<Vec<PendingVerification>> {
        self.fetch(Endpoint::get("/admin/verifications")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::auth::AuthSession;
    use crate::error::ApiError;
    use crate::ports::CredentialStore;
    use crate::test_support::{Harness, Step};
    use gigboard_domain::models::DocumentKind;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_pending_verifications() {
        let harness = Harness::with_token(
            [Step::json(
                200,
                r#"[{"id": "v1", "user_id": "u9", "document_kind": "passport",
                     "submitted_at": "2026-04-10T08:30:00Z"}]"#,
            )],
            "tok",
        );

        let pending = harness.api().admin_pending_verifications().await.unwrap();

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].document_kind, DocumentKind::Passport);
    }

    #[tokio::test]
    async fn test_expired_session_logs_the_admin_out() {
        let harness = Harness::with_token([Step::status(401), Step::status(401)], "tok");
        let session = AuthSession::restore(harness.store.clone(), Arc::clone(&harness.notifier));
        session.set_admin(true);
        let api = harness.api();

        let (first, second) = tokio::join!(
            api.admin_pending_verifications(),
            api.admin_pending_verifications()
        );

        assert_eq!(first, Err(ApiError::Unauthorized));
        assert_eq!(second, Err(ApiError::Unauthorized));
        assert!(!session.is_logged_in());
        assert!(!session.is_admin());
        assert_eq!(harness.store.load().unwrap(), None);
    }
}
