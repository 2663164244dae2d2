//! Error types used throughout the client

use std::time::Duration;

use thiserror::Error;

/// Coarse error categories callers branch on to pick the next flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Gave up waiting for network connectivity
    Connectivity,
    /// The app token could not be refreshed
    TokenRefresh,
    /// A response body did not have the expected shape
    Parse,
    /// The server answered with a status >= 400
    HttpStatus,
    /// Socket, TLS or redirect failure below HTTP
    Transport,
    /// Invalid client configuration
    Config,
    /// Token persistence failed
    Storage,
}

/// Main error type for API operations
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Timed out after {0:?} waiting for network connectivity")]
    ConnectivityTimeout(Duration),

    #[error("App token refresh failed: {source}")]
    TokenRefreshFailed {
        #[source]
        source: Box<ApiError>,
    },

    #[error("Could not parse JSON: {0}")]
    JsonParse(String),

    #[error("{url} returned status {status}")]
    HttpStatus { status: u16, url: String, body: String },

    #[error("Transport error: {message}")]
    Transport { url: Option<String>, message: String, is_redirect: bool },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// Wrap the cause of a failed app token refresh.
    #[must_use]
    pub fn token_refresh_failed(source: Self) -> Self {
        Self::TokenRefreshFailed { source: Box::new(source) }
    }

    /// Get the category for this error
    #[must_use]
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::ConnectivityTimeout(_) => ApiErrorKind::Connectivity,
            Self::TokenRefreshFailed { .. } => ApiErrorKind::TokenRefresh,
            Self::JsonParse(_) => ApiErrorKind::Parse,
            Self::HttpStatus { .. } => ApiErrorKind::HttpStatus,
            Self::Transport { .. } => ApiErrorKind::Transport,
            Self::Config(_) => ApiErrorKind::Config,
            Self::Storage(_) => ApiErrorKind::Storage,
        }
    }

    /// HTTP status code, when the server produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::TokenRefreshFailed { source } => source.status(),
            _ => None,
        }
    }

    /// URL of the request (or of the last redirect hop) that failed.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { url, .. } => Some(url),
            Self::Transport { url, .. } => url.as_deref(),
            _ => None,
        }
    }

    /// Raw response body of a failed HTTP exchange.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(ApiError::JsonParse("x".into()).kind(), ApiErrorKind::Parse);
        assert_eq!(
            ApiError::ConnectivityTimeout(Duration::from_secs(1)).kind(),
            ApiErrorKind::Connectivity
        );
        assert_eq!(ApiError::Storage("x".into()).kind(), ApiErrorKind::Storage);
    }

    #[test]
    fn test_refresh_failure_exposes_cause_status() {
        let cause = ApiError::HttpStatus {
            status: 401,
            url: "https://api.artsy.net/api/v1/xapp_token".into(),
            body: "unauthorized".into(),
        };
        let err = ApiError::token_refresh_failed(cause);

        assert_eq!(err.kind(), ApiErrorKind::TokenRefresh);
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_url_accessor() {
        let err = ApiError::Transport {
            url: Some("https://api.artsy.net/api/v1/bidder/42".into()),
            message: "redirect refused".into(),
            is_redirect: true,
        };
        assert_eq!(err.url(), Some("https://api.artsy.net/api/v1/bidder/42"));
        assert_eq!(ApiError::Config("bad".into()).url(), None);
    }
}
