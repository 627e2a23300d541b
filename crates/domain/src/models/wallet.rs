//! Earnings and payout shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Worker balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Funds that can be withdrawn now, in minor units.
    pub available_cents: i64,
    /// Earnings not yet released, in minor units.
    pub pending_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// Payout request.
///
/// The idempotency key lets the server deduplicate a request the user
/// submits twice; the client still sends it exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    /// Amount to withdraw, in minor units.
    pub amount_cents: i64,
    /// Caller-chosen deduplication key.
    pub idempotency_key: String,
}

impl WithdrawalRequest {
    /// Creates a request with a fresh idempotency key. Keep the value and
    /// resend it unchanged if the user confirms the same payout again.
    #[must_use]
    pub fn new(amount_cents: i64) -> Self {
        Self {
            amount_cents,
            idempotency_key: crate::id::generate_idempotency_key(),
        }
    }
}

/// Progress of a payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStatus {
    /// Accepted, not yet sent to the bank.
    Requested,
    /// Sent to the bank.
    Processing,
    /// Funds delivered.
    Paid,
    /// Payout failed; funds returned to the balance.
    Failed,
}

/// A payout as recorded by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Withdrawal id.
    pub id: String,
    /// Amount in minor units.
    pub amount_cents: i64,
    /// Current status.
    pub status: WithdrawalStatus,
    /// Request time.
    pub requested_at: DateTime<Utc>,
}

/// The narrow result a payment SDK hands back after a card payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    /// Provider payment intent id.
    pub payment_intent_id: String,
    /// Provider status string, passed through.
    pub status: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_withdrawal_requests_get_distinct_keys() {
        let first = WithdrawalRequest::new(2_500);
        let second = WithdrawalRequest::new(2_500);
        assert_eq!(first.amount_cents, 2_500);
        assert_ne!(first.idempotency_key, second.idempotency_key);
    }

    #[test]
    fn test_decode_withdrawal() {
        let withdrawal: Withdrawal = serde_json::from_str(
            r#"{"id": "w1", "amount_cents": 2500, "status": "processing",
                "requested_at": "2026-05-02T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(withdrawal.status, WithdrawalStatus::Processing);
    }
}
