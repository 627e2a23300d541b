//! Account endpoints.

use gigboard_domain::Endpoint;
use gigboard_domain::models::{AuthTokens, LoginRequest, RegisterRequest, SocialLoginRequest, User};

use super::GigboardApi;
use crate::error::ApiResult;
use crate::ports::HttpTransport;

impl<T: HttpTransport> GigboardApi<T> {
    /// Exchanges email and password for a session token.
    ///
    /// The returned token is not stored; hand it to
    /// [`crate::auth::AuthSession::sign_in`].
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthTokens> {
        self.fetch(Endpoint::post("/auth/login").without_auth().with_json(credentials)?)
            .await
    }

    /// Creates an account and signs it in.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn register(&self, account: &RegisterRequest) -> ApiResult<AuthTokens> {
        self.fetch(Endpoint::post("/auth/register").without_auth().with_json(account)?)
            .await
    }

    /// Exchanges a social provider identity token for a session token.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn social_login(&self, login: &SocialLoginRequest) -> ApiResult<AuthTokens> {
        self.fetch(Endpoint::post("/auth/social").without_auth().with_json(login)?)
            .await
    }

    /// Revokes the session token on the server.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn logout(&self) -> ApiResult<()> {
        self.send(Endpoint::post("/auth/logout")).await
    }

    /// Returns the signed-in account.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn current_user(&self) -> ApiResult<User> {
        self.fetch(Endpoint::get("/auth/me")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::error::ApiError;
    use crate::test_support::{Harness, Step};
    use gigboard_domain::HttpMethod;
    use gigboard_domain::models::{LoginRequest, SocialLoginRequest, SocialProvider};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    const TOKENS: &str = r#"{
        "access_token": "tok_1",
        "user": {
            "id": "u1", "email": "ana@example.com", "first_name": "Ana",
            "last_name": "Ruiz", "created_at": "2026-01-01T00:00:00Z"
        }
    }"#;

    #[tokio::test]
    async fn test_login_is_public_and_posts_credentials() {
        let harness = Harness::with_token([Step::json(200, TOKENS)], "stale");
        let request = LoginRequest {
            email: "ana@example.com".to_string(),
            password: "hunter22".to_string(),
        };

        let tokens = harness.api().login(&request).await.unwrap();

        assert_eq!(tokens.access_token, "tok_1");
        assert_eq!(tokens.token_type, "bearer");
        let sent = harness.transport.last_request();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url.path(), "/v1/auth/login");
        assert_eq!(sent.header("authorization"), None);
        let body: Value = serde_json::from_slice(&sent.body.unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"email": "ana@example.com", "password": "hunter22"})
        );
    }

    #[tokio::test]
    async fn test_wrong_password_surfaces_server_message() {
        let harness = Harness::new([Step::json(400, r#"{"detail": "Incorrect email or password"}"#)]);
        let request = LoginRequest {
            email: "ana@example.com".to_string(),
            password: "nope".to_string(),
        };

        let result = harness.api().login(&request).await;

        assert_eq!(
            result.unwrap_err(),
            ApiError::ServerFailure("Incorrect email or password".to_string())
        );
    }

    #[tokio::test]
    async fn test_social_login_wire_shape() {
        let harness = Harness::new([Step::json(200, TOKENS)]);
        let request = SocialLoginRequest {
            provider: SocialProvider::Apple,
            id_token: "eyJ".to_string(),
            full_name: None,
        };

        harness.api().social_login(&request).await.unwrap();

        let sent = harness.transport.last_request();
        assert_eq!(sent.url.path(), "/v1/auth/social");
        let body: Value = serde_json::from_slice(&sent.body.unwrap()).unwrap();
        assert_eq!(body, json!({"provider": "apple", "id_token": "eyJ"}));
    }

    #[tokio::test]
    async fn test_current_user_and_logout_send_token() {
        let harness = Harness::with_token(
            [
                Step::json(
                    200,
                    r#"{"id": "u1", "email": "a@b.c", "first_name": "A", "last_name": "B",
                        "is_admin": true, "created_at": "2026-01-01T00:00:00Z"}"#,
                ),
                Step::status(204),
            ],
            "tok",
        );
        let api = harness.api();

        let user = api.current_user().await.unwrap();
        api.logout().await.unwrap();

        assert!(user.is_admin);
        for request in harness.transport.requests() {
            assert_eq!(request.header("authorization"), Some("Bearer tok"));
        }
    }
}
