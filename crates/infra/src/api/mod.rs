//! Typed clients for the auction API
//!
//! [`Networking`] builds the shared request pipeline once; [`ApiClient`]
//! sends guest operations and [`AuthorizedApiClient`] sends user operations
//! on behalf of a signed-in bidder.

pub mod client;
pub mod networking;

pub use client::{ApiClient, AuthorizedApiClient};
pub use networking::Networking;
