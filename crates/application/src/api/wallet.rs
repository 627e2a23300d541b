//! Earnings and payouts.

use gigboard_domain::Endpoint;
use gigboard_domain::models::{Ack, PaymentConfirmation, Wallet, Withdrawal, WithdrawalRequest};

use super::GigboardApi;
use crate::error::ApiResult;
use crate::ports::HttpTransport;

impl<T: HttpTransport> GigboardApi<T> {
    /// Returns the worker's balance.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn wallet(&self) -> ApiResult<Wallet> {
        self.fetch(Endpoint::get("/wallet")).await
    }

    /// Requests a payout.
    ///
    /// Sent once even though the body carries an idempotency key; callers
    /// that want to retry must resend the same request value.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn request_withdrawal(&self, request: &WithdrawalRequest) -> ApiResult<Withdrawal> {
        self.fetch(Endpoint::post("/wallet/withdrawals").with_json(request)?)
            .await
    }

    /// Reports the outcome of a card payment to the server.
    ///
    /// # Errors
    /// Returns the classified request failure.
    pub async fn confirm_payment(&self, confirmation: &PaymentConfirmation) -> ApiResult<Ack> {
        self.fetch(Endpoint::post("/wallet/payments/confirm").with_json(confirmation)?)
            .await
    }
}
