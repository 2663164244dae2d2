//! App token caching and user session resolution

pub mod ports;
pub mod session;
pub mod token_cache;

pub use ports::TokenStore;
pub use session::{AuthorizedRequests, UserSession};
pub use token_cache::AppTokenCache;
