//! Port interfaces for token persistence

use bidkiosk_domain::{AppToken, Result};

/// Persisted key-value storage for the guest app token
///
/// Calls are synchronous; both backing stores (OS keychain, small JSON file)
/// answer quickly and the cache calls them outside its lock.
pub trait TokenStore: Send + Sync {
    /// Load the persisted token, `None` when nothing was stored yet
    fn load(&self) -> Result<Option<AppToken>>;

    /// Replace the persisted token
    fn save(&self, token: &AppToken) -> Result<()>;
}
