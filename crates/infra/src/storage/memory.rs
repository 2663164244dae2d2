//! In-memory token store

use std::sync::{Arc, Mutex};

use bidkiosk_core::TokenStore;
use bidkiosk_domain::{ApiError, AppToken, Result};

/// Token store that lives as long as the process
///
/// Used by stubbed networking and tests. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<AppToken>>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a token, as if persisted by an earlier run.
    #[must_use]
    pub fn with_token(token: AppToken) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(token))) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AppToken>> {
        let slot = self.slot.lock().map_err(|_| ApiError::Storage("token slot poisoned".into()))?;
        Ok(slot.clone())
    }

    fn save(&self, token: &AppToken) -> Result<()> {
        let mut slot =
            self.slot.lock().map_err(|_| ApiError::Storage("token slot poisoned".into()))?;
        *slot = Some(token.clone());
        Ok(())
    }
}
