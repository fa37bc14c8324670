//! Blocking accounting sessions.
//!
//! Mirrors the async API over `reqwest::blocking`. Use it from synchronous code
//! only: `reqwest::blocking` runs its own runtime and panics when created or
//! dropped inside an async context.

mod factory;
mod oneshot;

pub use factory::AccountingSessionFactory;
pub use oneshot::{ActiveOneshotSession, OneshotSession};
