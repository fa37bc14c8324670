//! Demo service settings read from the environment.
//!
//! Accounting settings (`ACCOUNTING_*`) are read separately by
//! [`accounting_sdk::AccountingConfig::from_env`].

use std::net::SocketAddr;

use anyhow::Context;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Output format of the log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Address the HTTP server binds to (`DEMO_BIND_ADDR`).
    pub bind_addr: SocketAddr,
    /// `tracing-subscriber` env-filter directives (`RUST_LOG`).
    pub log_filter: String,
    /// `DEMO_LOG_FORMAT=json` switches to JSON logs.
    pub log_format: LogFormat,
    /// OTLP collector endpoint (`OTEL_EXPORTER_OTLP_ENDPOINT`); no export when unset.
    pub otlp_endpoint: Option<String>,
}

impl DemoConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let raw_addr = lookup("DEMO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .with_context(|| format!("DEMO_BIND_ADDR is not a socket address: '{raw_addr}'"))?;

        let log_format = match lookup("DEMO_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            bind_addr,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_format,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }
}
