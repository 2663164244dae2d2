//! Conversions from external infrastructure errors into `ApiError`.

use bidkiosk_domain::ApiError;
#[cfg(feature = "keychain")]
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ApiError);

impl From<InfraError> for ApiError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ApiError> for InfraError {
    fn from(value: ApiError) -> Self {
        InfraError(value)
    }
}

trait IntoApiError {
    fn into_api_error(self) -> ApiError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiError */
/* -------------------------------------------------------------------------- */

impl IntoApiError for HttpError {
    fn into_api_error(self) -> ApiError {
        let url = self.url().map(ToString::to_string);
        let is_redirect = self.is_redirect();

        let message = if self.is_timeout() {
            "HTTP request timed out".to_string()
        } else if self.is_connect() {
            format!("HTTP connection failure: {self}")
        } else if is_redirect {
            format!("HTTP redirect failure: {self}")
        } else {
            self.to_string()
        };

        ApiError::Transport { url, message, is_redirect }
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_api_error())
    }
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → ApiError */
/* -------------------------------------------------------------------------- */

#[cfg(feature = "keychain")]
impl IntoApiError for KeyringError {
    fn into_api_error(self) -> ApiError {
        use KeyringError::*;

        let description = self.to_string();

        match self {
            NoEntry => ApiError::Storage("keychain entry not found".into()),
            BadEncoding(_) => ApiError::Storage("credential in keychain is not valid UTF-8".into()),
            TooLong(name, limit) => ApiError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            PlatformFailure(err) => ApiError::Storage(format!("keychain platform error: {err}")),
            NoStorageAccess(err) => {
                ApiError::Storage(format!("unable to access secure storage: {err}"))
            }
            _ => ApiError::Storage(description),
        }
    }
}

#[cfg(feature = "keychain")]
impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_api_error())
    }
}

/* -------------------------------------------------------------------------- */
/* config parse errors → ApiError */
/* -------------------------------------------------------------------------- */

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(ApiError::Config(format!("Failed to parse TOML config: {value}")))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(ApiError::Config(format!("Failed to parse JSON config: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::Client;

    use super::*;

    #[cfg(feature = "keychain")]
    #[test]
    fn keyring_no_entry_maps_to_storage() {
        let mapped: ApiError = InfraError::from(KeyringError::NoEntry).into();
        match mapped {
            ApiError::Storage(msg) => assert!(msg.contains("keychain")),
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connect_failure_maps_to_transport_with_url() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let url = format!("http://{addr}/api/v1/system/ping");

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(&url).send().await.unwrap_err();

        let mapped: ApiError = InfraError::from(error).into();
        match mapped {
            ApiError::Transport { url: Some(failed), is_redirect, .. } => {
                assert_eq!(failed, url);
                assert!(!is_redirect);
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn toml_error_maps_to_config() {
        let err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let mapped: ApiError = InfraError::from(err).into();
        assert!(matches!(mapped, ApiError::Config(_)));
    }
}
