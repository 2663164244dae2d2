//! Guest app token cache
//!
//! Holds the current app token in memory and mirrors every update to an
//! optional [`TokenStore`]:
//! - Loaded from the store once at construction
//! - Overwritten on every successful refresh
//! - Store failures are logged, the in-memory value still changes

use std::sync::Arc;

use bidkiosk_domain::{AppToken, AppTokenResponse};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::ports::TokenStore;

/// Thread-safe app token cache
///
/// Readers never observe a token paired with another token's expiry; `set`
/// replaces both under one write lock. Concurrent writers are last-write-wins,
/// and the persisted token is always the last one written to memory.
pub struct AppTokenCache {
    current: RwLock<AppToken>,
    // Serializes the memory update together with its save
    persist: Mutex<()>,
    store: Option<Arc<dyn TokenStore>>,
}

impl AppTokenCache {
    /// Create a cache backed by `store`, seeded with whatever it holds.
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let initial = match store.load() {
            Ok(Some(token)) => {
                info!(valid = token.is_valid(), "Loaded persisted app token");
                token
            }
            Ok(None) => {
                debug!("No persisted app token found");
                AppToken::default()
            }
            Err(err) => {
                warn!(error = %err, "Failed to load persisted app token, starting empty");
                AppToken::default()
            }
        };

        Self { current: RwLock::new(initial), persist: Mutex::new(()), store: Some(store) }
    }

    /// Create a cache that never persists.
    #[must_use]
    pub fn in_memory() -> Self {
        Self { current: RwLock::new(AppToken::default()), persist: Mutex::new(()), store: None }
    }

    /// Token present and unexpired.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.current.read().is_valid()
    }

    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.current.read().is_valid_at(now)
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.current.read().token.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> AppToken {
        self.current.read().clone()
    }

    /// Replace token and expiry together, then persist.
    pub fn set(&self, token: impl Into<String>, expiry: Option<DateTime<Utc>>) {
        self.replace(AppToken::new(token, expiry));
    }

    /// Store the result of an `XApp` exchange and return the stored token.
    pub fn store_response(&self, response: AppTokenResponse) -> AppToken {
        let token = response.into_app_token();
        if token.expiry.is_none() {
            warn!("App token expiry did not parse, token will be refreshed on next use");
        }
        self.replace(token.clone());
        token
    }

    fn replace(&self, token: AppToken) {
        let _persisting = self.persist.lock();
        *self.current.write() = token.clone();

        if let Some(store) = &self.store {
            if let Err(err) = store.save(&token) {
                warn!(error = %err, "Failed to persist app token");
            }
        }
    }
}

impl std::fmt::Debug for AppTokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppTokenCache")
            .field("current", &*self.current.read())
            .field("persistent", &self.store.is_some())
            .finish()
    }
}
