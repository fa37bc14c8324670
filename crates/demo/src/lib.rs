//! Accounting demo service.
//!
//! A small axum application that answers text queries and charges each one to a
//! project through a one-shot accounting session:
//!
//! 1. reserve `3 × input length` units before running the query,
//! 2. run the query through a [`service::TextGenerator`],
//! 3. report `input length + output length` units once it succeeded.
//!
//! A failed query drops the session, so nothing is charged beyond the
//! reservation.
//!
//! The binary in `main.rs` is the composition root: it loads `.env`, wires
//! observability, builds the session factory, and serves [`api::router`].

pub mod api;
pub mod config;
pub mod errors;
pub mod service;
pub mod state;
pub mod telemetry;
