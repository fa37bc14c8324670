//! OBP accounting SDK.
//!
//! Charges a project's budget through the accounting service. A one-shot charge
//! is a two-phase exchange: reserve an estimated count before doing the work,
//! then report the actual count once the work has succeeded.
//!
//! ```no_run
//! # async fn demo() -> Result<(), accounting_sdk::AccountingError> {
//! use accounting_sdk::{AsyncAccountingSessionFactory, ProjectId, ServiceSubtype};
//!
//! let factory = AsyncAccountingSessionFactory::from_env()?;
//! let proj_id: ProjectId = "00000000-0000-0000-0000-000000000001".parse()?;
//!
//! let mut session = factory
//!     .oneshot_session(ServiceSubtype::MlLlm, proj_id, 300u64)
//!     .reserve()
//!     .await?;
//! // ... do the billable work ...
//! session.set_count(240u64);
//! session.finish().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, status classification, response parsing,
//! and the session state machines live here. Domain types come from the
//! [`accounting`] crate and are re-exported at this crate's root.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`config`] | [`AccountingConfig`], loaded from `ACCOUNTING_*` environment variables |
//! | [`factory`] | [`AsyncAccountingSessionFactory`] |
//! | [`oneshot`] | Async [`OneshotSession`] / [`ActiveOneshotSession`] |
//! | [`blocking`] | The same API over `reqwest::blocking` |
//!
//! ## Disabled mode
//!
//! With `ACCOUNTING_DISABLED=1` the factories hand out null sessions: the same
//! types and state machine, but no HTTP calls and no failures.

pub mod blocking;
pub mod config;
pub mod factory;
pub mod oneshot;

mod session;
mod transport;

pub use accounting::{
    AccountingError, Count, FailureKind, JobId, ProjectId, RetryPolicy, ServiceSubtype,
    ServiceType, Timestamp,
};
pub use config::AccountingConfig;
pub use factory::AsyncAccountingSessionFactory;
pub use oneshot::{ActiveOneshotSession, OneshotSession};
