//! Pieces of the HTTP exchange shared by the async and blocking clients.

use std::sync::Arc;

use accounting::wire::{ONESHOT_RESERVATION_PATH, ONESHOT_USAGE_PATH};
use accounting::{AccountingError, JobId, ReservationResponse};
use reqwest::StatusCode;
use tracing::{info, warn};

use crate::config::AccountingConfig;

/// Absolute endpoint URLs derived from a validated base URL.
#[derive(Debug)]
pub(crate) struct Endpoints {
    reservation: String,
    usage: String,
}

impl Endpoints {
    pub(crate) fn new(base_url: &str) -> Self {
        Self {
            reservation: format!("{base_url}{ONESHOT_RESERVATION_PATH}"),
            usage: format!("{base_url}{ONESHOT_USAGE_PATH}"),
        }
    }

    pub(crate) fn reservation(&self) -> &str {
        &self.reservation
    }

    pub(crate) fn usage(&self) -> &str {
        &self.usage
    }
}

/// How a session reaches the accounting service.
///
/// `C` is the HTTP client type: `reqwest::Client` or `reqwest::blocking::Client`.
#[derive(Debug, Clone)]
pub(crate) enum Transport<C> {
    Http {
        client: C,
        endpoints: Arc<Endpoints>,
    },
    /// Null sessions: every operation succeeds without I/O.
    Disabled,
}

impl<C> Transport<C> {
    pub(crate) fn http(client: C, base_url: &str) -> Self {
        Self::Http {
            client,
            endpoints: Arc::new(Endpoints::new(base_url)),
        }
    }

    /// Validates `config` and picks the transport a factory hands to its sessions.
    ///
    /// `client` is dropped unused when accounting is disabled.
    pub(crate) fn from_config(client: C, config: AccountingConfig) -> Result<Self, AccountingError> {
        let config = config.validate()?;
        if config.disabled {
            warn!("Accounting integration is disabled");
            Ok(Self::Disabled)
        } else {
            info!(base_url = %config.base_url, "Accounting session factory ready");
            Ok(Self::http(client, &config.base_url))
        }
    }
}

/// Maps a reservation response status to the SDK's error vocabulary.
///
/// `402 Payment Required` is the accounting service's way of reporting that the
/// project cannot cover the reservation.
pub(crate) fn check_reservation_status(url: &str, status: StatusCode) -> Result<(), AccountingError> {
    if status == StatusCode::PAYMENT_REQUIRED {
        return Err(AccountingError::InsufficientFunds);
    }
    if !status.is_success() {
        return Err(AccountingError::reservation_status(url, status.as_u16()));
    }
    Ok(())
}

pub(crate) fn check_usage_status(url: &str, status: StatusCode) -> Result<(), AccountingError> {
    if !status.is_success() {
        return Err(AccountingError::usage_status(url, status.as_u16()));
    }
    Ok(())
}

/// Extracts the job id from a successful reservation body.
pub(crate) fn parse_reservation(body: &[u8]) -> Result<JobId, AccountingError> {
    serde_json::from_slice::<ReservationResponse>(body)
        .map(|response| response.job_id)
        .map_err(AccountingError::reservation_parse)
}
