//! Accounting demo binary.
//!
//! Composition root: loads `.env`, wires observability, builds the accounting
//! session factory from `ACCOUNTING_*` variables, and serves the query API until
//! Ctrl-C.

use std::sync::Arc;

use accounting_sdk::AsyncAccountingSessionFactory;
use anyhow::Context;
use demo::config::DemoConfig;
use demo::service::EchoGenerator;
use demo::state::AppState;
use demo::{api, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let config = DemoConfig::from_env()?;
    let _telemetry = telemetry::init(&config)?;

    info!("Starting api");
    let accounting =
        AsyncAccountingSessionFactory::from_env().context("invalid accounting configuration")?;
    let state = AppState::new(accounting, Arc::new(EchoGenerator::default()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Listening");

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Stopping api");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
    }
}
