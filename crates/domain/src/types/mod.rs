//! Wire payloads and session types

pub mod bidder;
pub mod session;
pub mod tokens;

pub use bidder::{BidderCredentials, BidderLookup};
pub use session::{PaddleCredentials, UserAuth};
pub use tokens::{AccessTokenResponse, AppToken, AppTokenResponse};
