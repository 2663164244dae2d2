//! Configuration management

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, PRODUCTION_ORIGIN, STAGING_ORIGIN};
use crate::errors::{ApiError, Result};

/// Client application credentials sent when requesting tokens
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeys {
    pub key: String,
    #[serde(skip_serializing)]
    pub secret: String,
}

impl ApiKeys {
    #[must_use]
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self { key: key.into(), secret: secret.into() }
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys").field("key", &self.key).field("secret", &"<redacted>").finish()
    }
}

/// API client configuration
///
/// Built once at startup and shared read-only by every networking object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Talk to the staging host instead of production
    pub use_staging: bool,
    /// Replaces the production/staging origin (local servers, tests)
    pub base_url_override: Option<String>,
    pub keys: ApiKeys,
    /// Answer every request from canned sample responses
    pub stub_responses: bool,
    pub request_timeout_secs: u64,
    /// Fail requests that wait longer than this for connectivity; unset waits forever
    pub connectivity_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            use_staging: false,
            base_url_override: None,
            keys: ApiKeys::default(),
            stub_responses: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connectivity_timeout_secs: None,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// Origin every endpoint path is appended to.
    #[must_use]
    pub fn base_origin(&self) -> &str {
        if let Some(origin) = self.base_url_override.as_deref() {
            return origin;
        }
        if self.use_staging {
            STAGING_ORIGIN
        } else {
            PRODUCTION_ORIGIN
        }
    }

    /// Full URL for an endpoint path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_origin().trim_end_matches('/'), path)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn connectivity_timeout(&self) -> Option<Duration> {
        self.connectivity_timeout_secs.map(Duration::from_secs)
    }

    /// Check the configuration before any networking object is built.
    ///
    /// # Errors
    /// Returns `ApiError::Config` when the origin is not an absolute http(s)
    /// URL or the request timeout is zero.
    pub fn validate(&self) -> Result<()> {
        let origin = Url::parse(self.base_origin())
            .map_err(|e| ApiError::Config(format!("Invalid base URL: {e}")))?;
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "Unsupported base URL scheme: {}",
                origin.scheme()
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ApiError::Config("Request timeout must be positive".to_string()));
        }
        Ok(())
    }
}
