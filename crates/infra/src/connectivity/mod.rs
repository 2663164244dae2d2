//! Reachability monitoring

pub mod error;
pub mod reachability;

pub use error::MonitorError;
pub use reachability::{ReachabilityConfig, ReachabilityMonitor, ReachabilityProbe, TcpProbe};
