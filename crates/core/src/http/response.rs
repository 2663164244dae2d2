//! Successful API response

use bidkiosk_domain::{ApiError, Result};
use serde::de::DeserializeOwned;

use super::ports::TransportResponse;

/// A response whose status fell in `[200, 400)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: u16,
    url: String,
    location: Option<String>,
    body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Redirect target when the transport stopped at a 3xx.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body.
    ///
    /// # Errors
    /// Returns `ApiError::JsonParse` when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::JsonParse(e.to_string()))
    }
}

impl From<TransportResponse> for ApiResponse {
    fn from(response: TransportResponse) -> Self {
        Self {
            status: response.status,
            url: response.url,
            location: response.location,
            body: response.body,
        }
    }
}
