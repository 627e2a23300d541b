//! Worker profile shapes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Full worker profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Account id.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Free-form introduction.
    #[serde(default)]
    pub bio: Option<String>,
    /// Date of birth.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Postal code used for distance-based search.
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Public profile image.
    #[serde(default)]
    pub profile_image_url: Option<String>,
    /// Whether identity documents have been verified.
    #[serde(default)]
    pub is_verified: bool,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update: only the fields that are set are sent, so the
/// server leaves every other field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// New introduction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// New date of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// New postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl ProfileUpdate {
    /// Returns true if no field would be sent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone_number.is_none()
            && self.bio.is_none()
            && self.date_of_birth.is_none()
            && self.postal_code.is_none()
    }
}

/// Kinds of identity document accepted for verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Passport photo page.
    Passport,
    /// National identity card.
    NationalId,
    /// Residence or work permit.
    ResidencePermit,
    /// Driving licence.
    DriversLicense,
}

impl DocumentKind {
    /// Returns the wire name, as used in multipart text fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passport => "passport",
            Self::NationalId => "national_id",
            Self::ResidencePermit => "residence_permit",
            Self::DriversLicense => "drivers_license",
        }
    }
}

/// A certificate or licence the worker has uploaded evidence for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualification {
    /// Qualification id.
    pub id: String,
    /// Display name, e.g. "Food hygiene level 2".
    pub name: String,
    /// Evidence file location.
    #[serde(default)]
    pub document_url: Option<String>,
    /// Expiry date, if the qualification lapses.
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
    /// Whether staff have reviewed the evidence.
    #[serde(default)]
    pub is_verified: bool,
}
