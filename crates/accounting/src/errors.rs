//! Error and retry-policy types for the accounting SDK.
//!
//! [`AccountingError`] is the single error type returned by every session and
//! factory operation, sync or async. Transport details (the failing URL and
//! status) are folded into the message so callers do not depend on the HTTP
//! client's error types.
//!
//! [`RetryPolicy`] tells callers whether an error is worth retrying. The SDK
//! itself never retries.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry and, if so, after what delay.
///
/// - `Retryable` errors: transport failures, 5xx responses.
/// - `NonRetryable` errors: insufficient funds, rejected requests, invalid input,
///   invalid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    Retryable {
        /// Minimum back-off before the next attempt. `None` means the caller
        /// applies its own back-off schedule.
        after: Option<Duration>,
    },
    /// The operation must not be retried.
    NonRetryable,
}

// ---------------------------------------------------------------------------
// Accounting errors
// ---------------------------------------------------------------------------

/// What went wrong while talking to the accounting service.
///
/// Attached to [`AccountingError::Reservation`] and [`AccountingError::Usage`]
/// so the message and the retry decision come from the same source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced a response (connect error, timeout, ...).
    Transport,
    /// The service answered with a non-success status.
    Status(u16),
    /// The service answered 2xx but the body was not understood.
    InvalidResponse,
}

/// Errors produced by accounting sessions and factories.
#[derive(Debug, Error)]
pub enum AccountingError {
    /// The reservation could not be made.
    #[error("{message}")]
    Reservation {
        /// Human-readable description, including the requested URL.
        message: String,
        /// Classification used by [`AccountingError::retry_policy`].
        kind: FailureKind,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The accounting service refused the reservation with `402 Payment Required`.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Usage could not be reported.
    #[error("{message}")]
    Usage {
        /// Human-readable description, including the requested URL.
        message: String,
        /// Classification used by [`AccountingError::retry_policy`].
        kind: FailureKind,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A project id string is not a valid UUID.
    #[error("Invalid project id: {value}")]
    InvalidProjectId {
        /// The rejected input.
        value: String,
    },

    /// A subtype name is not one of the known service subtypes.
    #[error("Invalid service subtype: {value}")]
    InvalidSubtype {
        /// The rejected input.
        value: String,
    },

    /// The SDK configuration is unusable.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl AccountingError {
    /// A request to `url` failed before a response arrived.
    pub fn reservation_transport(
        url: &str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Reservation {
            message: transport_message(url),
            kind: FailureKind::Transport,
            source: Some(Box::new(source)),
        }
    }

    /// The reservation request to `url` was answered with `status`.
    pub fn reservation_status(url: &str, status: u16) -> Self {
        Self::Reservation {
            message: status_message(url, status),
            kind: FailureKind::Status(status),
            source: None,
        }
    }

    /// The reservation succeeded but its body could not be parsed.
    pub fn reservation_parse(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Reservation {
            message: "Error while parsing the response".to_string(),
            kind: FailureKind::InvalidResponse,
            source: Some(Box::new(source)),
        }
    }

    /// A usage request to `url` failed before a response arrived.
    pub fn usage_transport(
        url: &str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Usage {
            message: transport_message(url),
            kind: FailureKind::Transport,
            source: Some(Box::new(source)),
        }
    }

    /// The usage request to `url` was answered with `status`.
    pub fn usage_status(url: &str, status: u16) -> Self {
        Self::Usage {
            message: status_message(url, status),
            kind: FailureKind::Status(status),
            source: None,
        }
    }

    /// `true` for every failure of the reservation phase, including
    /// [`AccountingError::InsufficientFunds`].
    pub fn is_reservation_error(&self) -> bool {
        matches!(self, Self::Reservation { .. } | Self::InsufficientFunds)
    }

    /// `true` for failures of the usage phase.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::Usage { .. })
    }

    /// Returns whether the failed operation may be retried.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::Reservation { kind, .. } | Self::Usage { kind, .. } => match kind {
                FailureKind::Transport => RetryPolicy::Retryable { after: None },
                FailureKind::Status(status) if *status >= 500 => {
                    RetryPolicy::Retryable { after: None }
                }
                FailureKind::Status(_) | FailureKind::InvalidResponse => RetryPolicy::NonRetryable,
            },
            Self::InsufficientFunds
            | Self::InvalidProjectId { .. }
            | Self::InvalidSubtype { .. }
            | Self::Configuration { .. } => RetryPolicy::NonRetryable,
        }
    }
}

fn transport_message(url: &str) -> String {
    format!("Error while requesting '{url}'")
}

fn status_message(url: &str, status: u16) -> String {
    format!("Error response {status} while requesting '{url}'")
}
