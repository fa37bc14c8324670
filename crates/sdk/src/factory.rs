//! Async session factory.

use accounting::{AccountingError, Count, ProjectId, ServiceSubtype};

use crate::config::AccountingConfig;
use crate::oneshot::OneshotSession;
use crate::transport::Transport;

/// Hands out async accounting sessions that share one HTTP connection pool.
///
/// Build one per application (for example in the web server's startup) and keep
/// it in shared state. Dropping the factory releases the pool once every session
/// created from it is gone.
#[derive(Debug, Clone)]
pub struct AsyncAccountingSessionFactory {
    transport: Transport<reqwest::Client>,
}

impl AsyncAccountingSessionFactory {
    /// Creates a factory with its own HTTP client.
    pub fn new(config: AccountingConfig) -> Result<Self, AccountingError> {
        let config = config.validate()?;
        let client = reqwest::Client::builder()
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

    /// Creates a factory around a caller-supplied HTTP client.
    ///
    /// The client's own timeout settings apply; `config.timeout` is ignored.
    pub fn with_client(
        client: reqwest::Client,
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
    /// [`OneshotSession::reserve`] is awaited.
    pub fn oneshot_session(
        &self,
        subtype: ServiceSubtype,
        proj_id: ProjectId,
        count: impl Into<Count>,
    ) -> OneshotSession {
        OneshotSession::new(self.transport.clone(), subtype, proj_id, count.into())
    }
}
