//! App token state and token exchange payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Guest app token with its absolute expiry
///
/// Both fields start empty. A token whose expiry could not be parsed is kept
/// but never reported valid.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppToken {
    pub token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

impl AppToken {
    #[must_use]
    pub fn new(token: impl Into<String>, expiry: Option<DateTime<Utc>>) -> Self {
        Self { token: Some(token.into()), expiry }
    }

    /// Token present and expiry strictly after `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.token, self.expiry) {
            (Some(_), Some(expiry)) => expiry > now,
            _ => false,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

impl std::fmt::Debug for AppToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppToken")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Body of a successful `XApp` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppTokenResponse {
    pub xapp_token: String,
    /// ISO-8601 timestamp, despite the name
    pub expires_in: String,
}

impl AppTokenResponse {
    /// Parsed `expires_in`, or `None` when the server sent something else.
    #[must_use]
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.expires_in.trim()).ok().map(|dt| dt.with_timezone(&Utc))
    }

    #[must_use]
    pub fn into_app_token(self) -> AppToken {
        let expiry = self.expiry();
        AppToken { token: Some(self.xapp_token), expiry }
    }
}

/// Body of a successful `XAuth` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_validity_follows_expiry() {
        let response: AppTokenResponse =
            serde_json::from_str(r#"{"xapp_token":"abc","expires_in":"2030-01-01T00:00:00Z"}"#)
                .unwrap();
        let token = response.into_app_token();

        let before = Utc.with_ymd_and_hms(2029, 12, 31, 23, 59, 59).unwrap();
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 1).unwrap();

        assert_eq!(token.token.as_deref(), Some("abc"));
        assert!(token.is_valid_at(before));
        assert!(!token.is_valid_at(at));
        assert!(!token.is_valid_at(after));
    }

    #[test]
    fn test_empty_token_is_invalid() {
        assert!(!AppToken::default().is_valid());
        assert!(!AppToken { token: None, expiry: Some(Utc::now()) }.is_valid());
    }

    #[test]
    fn test_unparseable_expiry_keeps_token_but_is_invalid() {
        let response =
            AppTokenResponse { xapp_token: "abc".into(), expires_in: "next tuesday".into() };
        assert!(response.expiry().is_none());

        let token = response.into_app_token();
        assert_eq!(token.token.as_deref(), Some("abc"));
        assert!(!token.is_valid());
    }

    #[test]
    fn test_offset_timestamps_normalize_to_utc() {
        let response = AppTokenResponse {
            xapp_token: "abc".into(),
            expires_in: "2030-01-01T02:00:00+02:00".into(),
        };
        assert_eq!(response.expiry(), Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_debug_hides_token() {
        let token = AppToken::new("secret-token", None);
        assert!(!format!("{token:?}").contains("secret-token"));
    }
}
