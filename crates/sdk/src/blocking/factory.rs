//! Blocking session factory.

use accounting::{AccountingError, Count, ProjectId, ServiceSubtype};

use super::oneshot::OneshotSession;
use crate::config::AccountingConfig;
use crate::transport::Transport;

/// Hands out blocking accounting sessions that share one HTTP connection pool.
#[derive(Debug, Clone)]
pub struct AccountingSessionFactory {
    transport: Transport<reqwest::blocking::Client>,
}

impl AccountingSessionFactory {
    /// Creates a factory with its own blocking HTTP client.
    pub fn new(config: AccountingConfig) -> Result<Self, AccountingError> {
        let config = config.validate()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AccountingError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Self::with_client(client, config)
    }

    /// Creates a factory from `ACCOUNTING_*` environment variables.
    pub fn from_env() -> Result<Self, AccountingError> {
        Self::new(AccountingConfig::from_env()?)
    }

    /// Creates a factory around a caller-supplied blocking HTTP client.
    pub fn with_client(
        client: reqwest::blocking::Client,
        config: AccountingConfig,
    ) -> Result<Self, AccountingError> {
        Ok(Self {
            transport: Transport::from_config(client, config)?,
        })
    }

    /// `true` when sessions from this factory never contact the service.
    pub fn is_disabled(&self) -> bool {
        matches!(self.transport, Transport::Disabled)
    }

    /// Starts a one-shot session. Nothing is sent until
    /// [`OneshotSession::reserve`] or [`OneshotSession::run`] is called.
    pub fn oneshot_session(
        &self,
        subtype: ServiceSubtype,
        proj_id: ProjectId,
        count: impl Into<Count>,
    ) -> OneshotSession {
        OneshotSession::new(self.transport.clone(), subtype, proj_id, count.into())
    }
}
