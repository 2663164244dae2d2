//! # BidKiosk Core
//!
//! Request orchestration for the bidding kiosk API client.
//!
//! This crate contains:
//! - Port interfaces (HTTP transport, token store, interceptors)
//! - The app token cache and connectivity gate
//! - The request pipeline and user session resolution
//!
//! ## Architecture Principles
//! - Only depends on `bidkiosk-domain`
//! - No sockets, files or keychains; all I/O goes through traits
//! - Infra supplies the adapters

pub mod auth;
pub mod bidder;
pub mod connectivity;
pub mod http;
pub mod pipeline;

pub use auth::{AppTokenCache, AuthorizedRequests, TokenStore, UserSession};
pub use bidder::classify_bidder_lookup;
pub use connectivity::ConnectivityGate;
pub use http::{ApiResponse, HttpTransport, TransportRequest, TransportResponse};
pub use pipeline::{Interceptor, RequestPipeline};
