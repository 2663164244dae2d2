//! Shared test helpers for `bidkiosk-core` integration tests.
//!
//! In-memory fakes for the core ports so pipeline and session tests can
//! script server answers and inspect what was sent.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use bidkiosk_core::{
    ApiResponse, AppTokenCache, ConnectivityGate, HttpTransport, Interceptor, RequestPipeline,
    TokenStore, TransportRequest, TransportResponse,
};
use bidkiosk_domain::{ApiConfig, ApiKeys, ApiTarget, AppToken, Result};
use parking_lot::Mutex;

pub const VALID_XAPP: &str = r#"{"xapp_token":"fresh-token","expires_in":"2099-01-01T00:00:00Z"}"#;

struct Rule {
    path: String,
    status: u16,
    body: String,
    location: Option<String>,
}

/// Transport that answers from scripted rules and records every request.
///
/// The first rule whose path occurs in the request URL wins; unmatched
/// requests get `200 {}`.
#[derive(Default)]
pub struct RecordingTransport {
    rules: Mutex<Vec<Rule>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.rules.lock().push(Rule {
            path: path.to_string(),
            status,
            body: body.to_string(),
            location: None,
        });
    }

    pub fn redirect(&self, path: &str, location: &str) {
        self.rules.lock().push(Rule {
            path: path.to_string(),
            status: 302,
            body: String::new(),
            location: Some(location.to_string()),
        });
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests.lock().iter().filter(|r| r.url.contains(path)).count()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let url = request.url.clone();
        self.requests.lock().push(request);

        let rules = self.rules.lock();
        let response = match rules.iter().find(|rule| url.contains(&rule.path)) {
            Some(rule) => TransportResponse {
                status: rule.status,
                url: url.clone(),
                location: rule.location.clone(),
                body: rule.body.clone().into_bytes(),
            },
            None => TransportResponse { status: 200, url, location: None, body: b"{}".to_vec() },
        };
        Ok(response)
    }
}

/// Token store backed by a mutex, counting saves.
#[derive(Default)]
pub struct MemoryTokenStore {
    pub token: Mutex<Option<AppToken>>,
    pub saves: Mutex<usize>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AppToken>> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &AppToken) -> Result<()> {
        *self.token.lock() = Some(token.clone());
        *self.saves.lock() += 1;
        Ok(())
    }
}

/// Interceptor that records hook invocations as `"<hook>:<target>"`.
#[derive(Default)]
pub struct RecordingInterceptor {
    pub label: &'static str,
    pub events: Arc<Mutex<Vec<String>>>,
}

impl Interceptor for RecordingInterceptor {
    fn before_send(&self, _request: &TransportRequest, target: &ApiTarget) {
        self.events.lock().push(format!("{}:before:{}", self.label, target.name()));
    }

    fn after_receive(&self, result: &Result<ApiResponse>, target: &ApiTarget) {
        let outcome = if result.is_ok() { "ok" } else { "err" };
        self.events.lock().push(format!("{}:after:{}:{}", self.label, target.name(), outcome));
    }
}

pub fn test_config() -> Arc<ApiConfig> {
    Arc::new(ApiConfig {
        keys: ApiKeys::new("kiosk-key", "kiosk-secret"),
        base_url_override: Some("https://api.test".to_string()),
        ..ApiConfig::default()
    })
}

pub fn pipeline_with(
    transport: Arc<RecordingTransport>,
    gate: ConnectivityGate,
    cache: Arc<AppTokenCache>,
) -> RequestPipeline {
    RequestPipeline::new(test_config(), transport, gate, cache)
}

pub fn online_pipeline(transport: Arc<RecordingTransport>) -> RequestPipeline {
    pipeline_with(transport, ConnectivityGate::always_online(), Arc::new(AppTokenCache::in_memory()))
}
