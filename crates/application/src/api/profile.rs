//! Profile, identity verification and qualification endpoints.

use chrono::NaiveDate;
use gigboard_domain::models::{Ack, DocumentKind, Profile, ProfileUpdate, Qualification};
use gigboard_domain::{Endpoint, MultipartForm};

use super::{GigboardApi, UploadFile, segment};
use crate::error::ApiResult;
use crate::ports::HttpTransport;

impl<T: HttpTransport> GigboardApi<T> {
    /// Returns the worker's profile.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn profile(&self) -> ApiResult<Profile> {
        self.fetch(Endpoint::get("/profile")).await
    }

    /// Applies a partial update; unset fields are not sent.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<Profile> {
        self.fetch(Endpoint::put("/profile").with_json(update)?).await
    }

    /// Replaces the profile picture.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn upload_profile_image(&self, image: UploadFile) -> ApiResult<Ack> {
        let form = MultipartForm::new().file(
            "image",
            image.filename,
            image.content_type,
            image.bytes,
        );
        self.upload_form(Endpoint::upload("/profile/image"), form).await
    }

    /// Submits an identity document for staff verification.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn upload_identity_document(
        &self,
        kind: DocumentKind,
        document: UploadFile,
    ) -> ApiResult<Ack> {
        let form = MultipartForm::new()
            .text("document_type", kind.as_str())
            .file(
                "document",
                document.filename,
                document.content_type,
                document.bytes,
            );
        self.upload_form(Endpoint::upload("/profile/identity-documents"), form)
            .await
    }

    /// Lists the worker's qualifications.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn qualifications(&self) -> ApiResult<Vec<Qualification>> {
        self.fetch(Endpoint::get("/profile/qualifications")).await
    }

    /// Uploads evidence for a qualification such as a food hygiene
    /// certificate.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn upload_qualification(
        &self,
        name: &str,
        expires_on: Option<NaiveDate>,
        evidence: UploadFile,
    ) -> ApiResult<Ack> {
        let mut form = MultipartForm::new().text("name", name);
        if let Some(date) = expires_on {
            form = form.text("expires_on", date.format("%Y-%m-%d").to_string());
        }
        let form = form.file(
            "document",
            evidence.filename,
            evidence.content_type,
            evidence.bytes,
        );
        self.upload_form(Endpoint::upload("/profile/qualifications"), form)
            .await
    }

    /// Removes a qualification.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn delete_qualification(&self, qualification_id: &str) -> ApiResult<()> {
        let id = segment(qualification_id)?;
        self.send(Endpoint::delete(format!("/profile/qualifications/{id}")))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::test_support::{Harness, Step};
    use gigboard_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    const PROFILE: &str = r#"{
        "id": "u1", "first_name": "Ana", "last_name": "Ruiz",
        "bio": "Weekend barista", "updated_at": "2026-02-01T12:00:00Z"
    }"#;

    fn multipart_boundary(content_type: &str) -> &str {
        content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap()
    }

    #[tokio::test]
    async fn test_update_profile_sends_only_set_fields() {
        let harness = Harness::with_token([Step::json(200, PROFILE)], "tok");
        let update = ProfileUpdate {
            bio: Some("Weekend barista".to_string()),
            ..ProfileUpdate::default()
        };

        let profile = harness.api().update_profile(&update).await.unwrap();

        assert_eq!(profile.bio.as_deref(), Some("Weekend barista"));
        let sent = harness.transport.last_request();
        assert_eq!(sent.method, HttpMethod::Put);
        let body: Value = serde_json::from_slice(&sent.body.unwrap()).unwrap();
        assert_eq!(body, json!({"bio": "Weekend barista"}));
    }

    #[tokio::test]
    async fn test_profile_image_is_multipart() {
        let harness = Harness::with_token([Step::json(200, r#"{"url": "https://cdn.test/me.jpg"}"#)], "tok");

        let ack = harness
            .api()
            .upload_profile_image(UploadFile::new("me.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]))
            .await
            .unwrap();

        assert!(ack.success);
        let sent = harness.transport.last_request();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url.path(), "/v1/profile/image");
        let content_type = sent.header("content-type").unwrap();
        let boundary = multipart_boundary(content_type);
        let body = sent.body.clone().unwrap();
        let head = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"me.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
        );
        assert!(body.starts_with(head.as_bytes()));
        assert!(body.ends_with(format!("\r\n--{boundary}--\r\n").as_bytes()));
    }

    #[tokio::test]
    async fn test_identity_document_fields() {
        let harness = Harness::with_token([Step::json(200, "{}")], "tok");

        harness
            .api()
            .upload_identity_document(
                DocumentKind::NationalId,
                UploadFile::new("id.pdf", "application/pdf", b"%PDF".to_vec()),
            )
            .await
            .unwrap();

        let body = String::from_utf8_lossy(&harness.transport.last_request().body.unwrap()).into_owned();
        assert!(body.contains("name=\"document_type\"\r\n\r\nnational_id\r\n"));
        assert!(body.contains("name=\"document\"; filename=\"id.pdf\"\r\nContent-Type: application/pdf"));
    }

    #[tokio::test]
    async fn test_qualification_upload_includes_expiry() {
        let harness = Harness::with_token([Step::json(200, "{}")], "tok");

        harness
            .api()
            .upload_qualification(
                "Food hygiene",
                NaiveDate::from_ymd_opt(2027, 6, 30),
                UploadFile::new("cert.png", "image/png", vec![1, 2, 3]),
            )
            .await
            .unwrap();

        let body = String::from_utf8_lossy(&harness.transport.last_request().body.unwrap()).into_owned();
        assert!(body.contains("name=\"expires_on\"\r\n\r\n2027-06-30\r\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_failure_is_single_attempt() {
        let harness = Harness::with_token([Step::status(502), Step::json(200, "{}")], "tok");

        let result = harness
            .api()
            .upload_profile_image(UploadFile::new("me.jpg", "image/jpeg", vec![1]))
            .await;

        assert!(matches!(result, Err(ApiError::ServerFailure(_))));
        assert_eq!(harness.transport.attempts(), 1);
    }

    #[tokio::test]
    async fn test_delete_qualification_path() {
        let harness = Harness::with_token([Step::status(204)], "tok");

        harness.api().delete_qualification("q_12").await.unwrap();

        let sent = harness.transport.last_request();
        assert_eq!(sent.method, HttpMethod::Delete);
        assert_eq!(sent.url.path(), "/v1/profile/qualifications/q_12");
    }

    #[tokio::test]
    async fn test_bad_identifier_is_rejected_before_sending() {
        let harness = Harness::with_token([], "tok");

        let result = harness.api().delete_qualification("../../admin").await;

        assert!(matches!(result, Err(ApiError::InvalidRequestTarget(_))));
        assert_eq!(harness.transport.attempts(), 0);
    }
}
