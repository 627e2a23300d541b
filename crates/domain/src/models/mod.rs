//! Marketplace data shapes exchanged with the API.
//!
//! Wire keys are snake_case, which is also the Rust field convention, so the
//! derived serde impls map keys one to one. Optional request fields are
//! omitted from the payload when absent.

mod admin;
mod applications;
mod auth;
mod common;
mod jobs;
mod profile;
mod wallet;

pub use admin::PendingVerification;
pub use applications::{ApplicationStatus, ApplyRequest, JobApplication};
pub use auth::{AuthTokens, LoginRequest, RegisterRequest, SocialLoginRequest, SocialProvider, User};
pub use common::{Ack, ErrorBody, Page};
pub use jobs::{EmploymentType, JobDetail, JobSearchQuery, JobSummary, Wage, WagePeriod};
pub use profile::{DocumentKind, Profile, ProfileUpdate, Qualification};
pub use wallet::{PaymentConfirmation, Wallet, Withdrawal, WithdrawalRequest, WithdrawalStatus};
