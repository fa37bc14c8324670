//! Accounting domain for the OBP accounting SDK.
//!
//! This crate holds every domain concept shared by the session implementations:
//! project and job identifiers, service type tags, unit counts, timestamps, the
//! JSON payloads exchanged with the accounting service, and the error type all
//! sessions report.
//!
//! ## Architectural Layer
//!
//! **Domain.** This crate has no I/O dependencies. The `accounting-sdk` crate
//! owns HTTP transport and session lifecycles; it builds on the types defined
//! here.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | UUID newtypes (`ProjectId`, `JobId`) |
//! | [`types`] | Service tags and value types (`ServiceSubtype`, `Count`, `Timestamp`) |
//! | [`wire`] | Request/response bodies and endpoint paths |
//! | [`errors`] | [`AccountingError`] and [`RetryPolicy`] |

pub mod errors;
pub mod identifiers;
pub mod types;
pub mod wire;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{AccountingError, FailureKind, RetryPolicy};
pub use identifiers::{JobId, ProjectId};
pub use types::{Count, ServiceSubtype, ServiceType, Timestamp};
pub use wire::{OneshotReservationRequest, OneshotUsageRequest, ReservationResponse};
