//! OS keychain token store
//!
//! The token and its expiry are kept as two secrets under one service name,
//! keyed by account.

use bidkiosk_core::TokenStore;
use bidkiosk_domain::{ApiError, AppToken, Result};
use chrono::{DateTime, Utc};
use keyring::{Entry, Error as KeyringError};
use tracing::debug;

use crate::errors::InfraError;

const TOKEN_PREFIX: &str = "xapp_token.";
const EXPIRY_PREFIX: &str = "xapp_expiry.";

pub const DEFAULT_SERVICE: &str = "BidKiosk";
pub const DEFAULT_ACCOUNT: &str = "kiosk";

/// Platform keychain backed app token store
#[derive(Debug, Clone)]
pub struct KeychainTokenStore {
    service: String,
    account: String,
}

impl KeychainTokenStore {
    #[must_use]
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self { service: service.into(), account: account.into() }
    }

    fn entry(&self, prefix: &str) -> Result<Entry> {
        Entry::new(&self.service, &format!("{prefix}{}", self.account))
            .map_err(|e| ApiError::from(InfraError::from(e)))
    }

    fn read(&self, prefix: &str) -> Result<Option<String>> {
        match self.entry(prefix)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(KeyringError::NoEntry) => Ok(None),
            Err(other) => Err(ApiError::from(InfraError::from(other))),
        }
    }

    fn write(&self, prefix: &str, value: Option<&str>) -> Result<()> {
        let entry = self.entry(prefix)?;
        let outcome = match value {
            Some(value) => entry.set_password(value),
            None => match entry.delete_credential() {
                Err(KeyringError::NoEntry) => Ok(()),
                other => other,
            },
        };
        outcome.map_err(|e| ApiError::from(InfraError::from(e)))
    }
}

impl Default for KeychainTokenStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE, DEFAULT_ACCOUNT)
    }
}

impl TokenStore for KeychainTokenStore {
    fn load(&self) -> Result<Option<AppToken>> {
        debug!(account = %self.account, "Loading app token from keychain");

        let Some(token) = self.read(TOKEN_PREFIX)? else {
            return Ok(None);
        };
        let expiry = self
            .read(EXPIRY_PREFIX)?
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Ok(Some(AppToken { token: Some(token), expiry }))
    }

    fn save(&self, token: &AppToken) -> Result<()> {
        debug!(account = %self.account, "Storing app token in keychain");

        self.write(TOKEN_PREFIX, token.token.as_deref())?;
        let expiry = token.expiry.map(|dt| dt.to_rfc3339());
        self.write(EXPIRY_PREFIX, expiry.as_deref())
    }
}
