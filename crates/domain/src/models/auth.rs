//! Sign-in and registration shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Email/password credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// New account registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Referral code from another worker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

/// Identity providers whose SDK results can be exchanged for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialProvider {
    /// Sign in with Apple.
    Apple,
    /// Google Sign-In.
    Google,
}

/// The narrow result a social-login SDK hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLoginRequest {
    /// Which provider issued the token.
    pub provider: SocialProvider,
    /// Provider-issued identity token.
    pub id_token: String,
    /// Display name, only supplied by some providers on first sign-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Account summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account id.
    pub id: String,
    /// Account email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Whether the account has staff privileges.
    #[serde(default)]
    pub is_admin: bool,
    /// Whether identity documents have been verified.
    #[serde(default)]
    pub is_verified: bool,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// Session issued by login, registration or social login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Token scheme, always `bearer` in practice.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// The signed-in account.
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
