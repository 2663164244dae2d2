//! Shared helpers for infra integration tests

use std::sync::Arc;

use bidkiosk_core::TokenStore;
use bidkiosk_domain::{ApiConfig, ApiKeys, AppToken};
use bidkiosk_infra::{MemoryTokenStore, Networking};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_KEY: &str = "kiosk-key";
pub const CLIENT_SECRET: &str = "kiosk-secret";
pub const APP_TOKEN: &str = "live-xapp-token";

// ============================================================================
// Configuration
// ============================================================================

/// Configuration pointing every request at the mock server.
pub fn config_for(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url_override: Some(server.uri()),
        keys: ApiKeys::new(CLIENT_KEY, CLIENT_SECRET),
        request_timeout_secs: 5,
        ..ApiConfig::default()
    }
}

/// Production networking against the mock server with an in-memory store.
pub fn networking_for(server: &MockServer, store: &MemoryTokenStore) -> Networking {
    let store: Arc<dyn TokenStore> = Arc::new(store.clone());
    Networking::with_token_store(config_for(server), store).expect("networking should build")
}

// ============================================================================
// Mock Endpoints
// ============================================================================

/// Mount the app token endpoint, expecting exactly `times` refreshes.
pub async fn mount_xapp(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/api/v1/xapp_token"))
        .and(query_param("client_id", CLIENT_KEY))
        .and(query_param("client_secret", CLIENT_SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"{{"xapp_token":"{APP_TOKEN}","expires_in":"2099-01-01T00:00:00Z"}}"#
        )))
        .expect(times)
        .mount(server)
        .await;
}

/// Token that a previous run persisted and that is still valid.
pub fn persisted_token(token: &str) -> AppToken {
    AppToken::new(
        token,
        Some(chrono::DateTime::parse_from_rfc3339("2099-01-01T00:00:00Z")
            .expect("timestamp")
            .with_timezone(&chrono::Utc)),
    )
}
