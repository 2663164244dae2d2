//! Reachability monitor error types

use thiserror::Error;

/// Lifecycle errors of the background monitor
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonitorError {
    #[error("Reachability monitor already running")]
    AlreadyRunning,

    #[error("Reachability monitor not running")]
    NotRunning,

    /// Probe target could not be derived from the configured origin
    #[error("Invalid probe target: {0}")]
    InvalidTarget(String),

    #[error("Monitor task did not stop within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Monitor task join failed: {0}")]
    TaskJoinFailed(String),
}
