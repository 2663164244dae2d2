//! Logging and tracing setup
//!
//! - [`init_tracing`] installs the process-wide `tracing` subscriber
//! - [`NetworkLogger`] is the request interceptor that reports API traffic

pub mod network_logger;

use bidkiosk_domain::{ApiError, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub use network_logger::{LogEntry, LogLevel, NetworkLogger, OperationFilter};

/// Output format for [`init_tracing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install the global subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
///
/// # Errors
/// Returns `ApiError::Config` if a global subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_current_span(true)).try_init(),
    };

    installed.map_err(|e| ApiError::Config(format!("Failed to install tracing subscriber: {e}")))
}
