//! # BidKiosk Domain
//!
//! Pure types for the bidding kiosk API client.
//!
//! This crate contains:
//! - Endpoint catalogs (guest and authenticated) and parameter encoding
//! - Client configuration
//! - The `ApiError` taxonomy and Result alias
//! - Token, session and bidder payload types
//!
//! ## Architecture
//! - No dependencies on other BidKiosk crates
//! - No I/O; every function here is deterministic

pub mod config;
pub mod constants;
pub mod endpoints;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use endpoints::{
    encode_parameters, form_encode, ApiTarget, Endpoint, GuestEndpoint, HttpMethod, Parameters,
    UserEndpoint,
};
pub use errors::*;
pub use types::*;
