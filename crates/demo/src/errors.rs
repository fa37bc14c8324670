//! Request-level errors and their HTTP mapping.
//!
//! Response bodies only name the kind of failure. The full message, which can
//! contain accounting-service URLs, goes to the log.

use accounting_sdk::AccountingError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::service::GenerationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Accounting(#[from] AccountingError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Accounting(AccountingError::InsufficientFunds) => StatusCode::PAYMENT_REQUIRED,
            Self::Accounting(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Generation(GenerationError::EmptyInput) => StatusCode::BAD_REQUEST,
        }
    }

    /// Fixed name reported to clients in place of the error message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Accounting(AccountingError::InsufficientFunds) => "InsufficientFundsError",
            Self::Accounting(AccountingError::Reservation { .. }) => "AccountingReservationError",
            Self::Accounting(AccountingError::Usage { .. }) => "AccountingUsageError",
            Self::Accounting(_) => "AccountingError",
            Self::Generation(_) => "GenerationError",
        }
    }
}

/// Joins `err` and every error in its `source()` chain with `": "`.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    std::iter::successors(Some(err), |e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

/// Renders `{"message": "Error: <kind>"}` with the status from [`ApiError::status`].
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Accounting(err) => {
                tracing::error!(kind = self.kind(), error = %error_chain(err), "Accounting request failed");
            }
            Self::Generation(err) => tracing::warn!(error = %err, "Query rejected"),
        }
        let body = Json(json!({ "message": format!("Error: {}", self.kind()) }));
        (status, body).into_response()
    }
}
