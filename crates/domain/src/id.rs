//! ID generation utilities.

use uuid::Uuid;

/// Generates a random idempotency key for operations the server deduplicates,
/// such as withdrawal requests.
#[must_use]
pub fn generate_idempotency_key() -> String {
    Uuid::new_v4().to_string()
}
