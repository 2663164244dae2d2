//! # BidKiosk Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - HTTP transports (reqwest, offline stub)
//! - App token stores (keychain, JSON file, memory)
//! - Configuration loading (environment, JSON/TOML files)
//! - Logging interceptor and tracing setup
//! - Reachability monitoring
//! - The networking facade tying it together
//!
//! ## Architecture
//! - Implements traits defined in `bidkiosk-core`
//! - Depends on `bidkiosk-domain` and `bidkiosk-core`
//! - Contains all "impure" code (sockets, files, keychain)

pub mod api;
pub mod config;
pub mod connectivity;
pub mod errors;
pub mod http;
pub mod observability;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiClient, AuthorizedApiClient, Networking};
pub use connectivity::{MonitorError, ReachabilityConfig, ReachabilityMonitor};
pub use errors::InfraError;
pub use http::{ReqwestTransport, StubTransport};
pub use observability::network_logger::NetworkLogger;
pub use storage::{FileTokenStore, MemoryTokenStore};
#[cfg(feature = "keychain")]
pub use storage::KeychainTokenStore;
