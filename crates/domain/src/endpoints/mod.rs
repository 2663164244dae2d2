//! Endpoint catalogs
//!
//! Every API operation is a variant of one of two closed enums:
//!
//! - [`GuestEndpoint`]: operations available to the kiosk without a user
//!   session (authorized by the app token)
//! - [`UserEndpoint`]: operations that need a resolved user session
//!
//! Each variant maps to exactly one [`Endpoint`] descriptor. The mapping is a
//! pure function of the variant and its payload; exhaustive `match`es make a
//! missing mapping a compile error.

mod guest;
mod params;
mod user;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use guest::GuestEndpoint;
pub use params::{encode_parameters, form_encode, Parameters};
pub use user::UserEndpoint;

use crate::config::{ApiConfig, ApiKeys};

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Head,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Head => "HEAD",
        }
    }

    /// GET and HEAD carry parameters in the query string, the rest in a
    /// form-encoded body.
    #[must_use]
    pub const fn uses_query_parameters(self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved description of a single API operation
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    pub parameters: Option<Parameters>,
    pub requires_app_token: bool,
}

impl Endpoint {
    /// Full URL (without query string) under the configured origin.
    #[must_use]
    pub fn url(&self, config: &ApiConfig) -> String {
        config.url_for(&self.path)
    }
}

/// An operation from either catalog.
///
/// Interceptors and the request pipeline work on this type so one chain can
/// serve both sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiTarget {
    Guest(GuestEndpoint),
    User(UserEndpoint),
}

impl ApiTarget {
    /// Stable operation name for logs and filters.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Guest(endpoint) => endpoint.name(),
            Self::User(endpoint) => endpoint.name(),
        }
    }

    #[must_use]
    pub fn descriptor(&self, keys: &ApiKeys) -> Endpoint {
        match self {
            Self::Guest(endpoint) => endpoint.descriptor(keys),
            Self::User(endpoint) => endpoint.descriptor(),
        }
    }

    /// Canned response body served by the stub transport.
    #[must_use]
    pub fn sample_response(&self) -> &'static str {
        match self {
            Self::Guest(endpoint) => endpoint.sample_response(),
            Self::User(endpoint) => endpoint.sample_response(),
        }
    }

    #[must_use]
    pub const fn as_guest(&self) -> Option<&GuestEndpoint> {
        match self {
            Self::Guest(endpoint) => Some(endpoint),
            Self::User(_) => None,
        }
    }

    #[must_use]
    pub const fn as_user(&self) -> Option<&UserEndpoint> {
        match self {
            Self::User(endpoint) => Some(endpoint),
            Self::Guest(_) => None,
        }
    }
}

impl From<GuestEndpoint> for ApiTarget {
    fn from(endpoint: GuestEndpoint) -> Self {
        Self::Guest(endpoint)
    }
}

impl From<UserEndpoint> for ApiTarget {
    fn from(endpoint: UserEndpoint) -> Self {
        Self::User(endpoint)
    }
}

impl fmt::Display for ApiTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_methods() {
        assert!(HttpMethod::Get.uses_query_parameters());
        assert!(HttpMethod::Head.uses_query_parameters());
        assert!(!HttpMethod::Post.uses_query_parameters());
        assert!(!HttpMethod::Put.uses_query_parameters());
    }

    #[test]
    fn test_target_dispatches_to_catalog() {
        let keys = ApiKeys::new("key", "secret");
        let guest = ApiTarget::from(GuestEndpoint::Ping);
        let user = ApiTarget::from(UserEndpoint::Me);

        assert_eq!(guest.name(), "Ping");
        assert_eq!(guest.descriptor(&keys).path, "/api/v1/system/ping");
        assert_eq!(user.name(), "Me");
        assert_eq!(user.descriptor(&keys).path, "/api/v1/me");
        assert!(guest.as_user().is_none());
        assert!(user.as_user().is_some());
    }

    #[test]
    fn test_endpoint_url_uses_config_origin() {
        let config = ApiConfig { use_staging: true, ..ApiConfig::default() };
        let endpoint = GuestEndpoint::Artwork { id: "abc".into() }.descriptor(&config.keys);
        assert_eq!(endpoint.url(&config), "https://stagingapi.artsy.net/api/v1/artwork/abc");
    }
}
