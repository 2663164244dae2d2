//! Request pipeline - core dispatch logic
//!
//! Every request goes through the same stages:
//! 1. Wait on the connectivity gate
//! 2. Ensure a valid app token when the endpoint requires one, refreshing it
//!    through this pipeline when the cache is empty or expired
//! 3. Build the transport request and run `before_send` hooks
//! 4. Send, classify `[200, 400)` as success, run `after_receive` hooks

use std::sync::Arc;

use bidkiosk_domain::constants::{FORM_CONTENT_TYPE, XAPP_TOKEN_HEADER};
use bidkiosk_domain::{
    form_encode, ApiConfig, ApiError, ApiTarget, AppTokenResponse, Endpoint, GuestEndpoint,
    Result,
};
use tracing::{debug, info, instrument};

use super::interceptor::Interceptor;
use crate::auth::AppTokenCache;
use crate::connectivity::ConnectivityGate;
use crate::http::{ApiResponse, HttpTransport, TransportRequest, TransportResponse};

/// Shared request pipeline
///
/// Owned behind an `Arc` by the guest client and every user session built
/// from it.
pub struct RequestPipeline {
    config: Arc<ApiConfig>,
    transport: Arc<dyn HttpTransport>,
    gate: ConnectivityGate,
    token_cache: Arc<AppTokenCache>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl RequestPipeline {
    pub fn new(
        config: Arc<ApiConfig>,
        transport: Arc<dyn HttpTransport>,
        gate: ConnectivityGate,
        token_cache: Arc<AppTokenCache>,
    ) -> Self {
        Self { config, transport, gate, token_cache, interceptors: Vec::new() }
    }

    /// Append an interceptor; hooks run in registration order.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Same transport, gate and token cache with a different interceptor chain.
    #[must_use]
    pub fn with_interceptors(&self, interceptors: Vec<Arc<dyn Interceptor>>) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            gate: self.gate.clone(),
            token_cache: Arc::clone(&self.token_cache),
            interceptors,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn gate(&self) -> &ConnectivityGate {
        &self.gate
    }

    pub fn token_cache(&self) -> &Arc<AppTokenCache> {
        &self.token_cache
    }

    /// Run one request through the pipeline.
    ///
    /// `session_headers` are added after the app token header; user sessions
    /// pass their authorization headers here.
    ///
    /// # Errors
    /// - `ConnectivityTimeout` when the gate wait times out
    /// - `TokenRefreshFailed` when the app token could not be refreshed
    /// - `HttpStatus` for status codes outside `[200, 400)`
    /// - `Transport` for failures below HTTP
    #[instrument(skip(self, target, session_headers), fields(target = %target))]
    pub async fn request(
        &self,
        target: ApiTarget,
        session_headers: &[(String, String)],
    ) -> Result<ApiResponse> {
        self.gate.wait_online().await?;

        let endpoint = target.descriptor(&self.config.keys);
        let app_token =
            if endpoint.requires_app_token { Some(self.app_token().await?) } else { None };

        let mut headers = Vec::with_capacity(session_headers.len() + 1);
        if let Some(token) = app_token {
            headers.push((XAPP_TOKEN_HEADER.to_string(), token));
        }
        headers.extend(session_headers.iter().cloned());

        self.dispatch(&target, &endpoint, headers).await
    }

    /// Cached app token, refreshed first when missing or expired.
    async fn app_token(&self) -> Result<String> {
        if self.token_cache.is_valid() {
            if let Some(token) = self.token_cache.get() {
                return Ok(token);
            }
        }

        debug!("App token missing or expired, refreshing");
        self.refresh_app_token().await.map_err(ApiError::token_refresh_failed)
    }

    async fn refresh_app_token(&self) -> Result<String> {
        let target = ApiTarget::Guest(GuestEndpoint::XApp);
        let endpoint = target.descriptor(&self.config.keys);
        let response = self.dispatch(&target, &endpoint, Vec::new()).await?;

        let payload: AppTokenResponse = response.json()?;
        let stored = self.token_cache.store_response(payload);
        info!(expiry = ?stored.expiry, "App token refreshed");

        stored.token.ok_or_else(|| ApiError::JsonParse("xapp_token missing".to_string()))
    }

    async fn dispatch(
        &self,
        target: &ApiTarget,
        endpoint: &Endpoint,
        headers: Vec<(String, String)>,
    ) -> Result<ApiResponse> {
        let request = self.build_request(endpoint, headers);

        for interceptor in &self.interceptors {
            interceptor.before_send(&request, target);
        }

        let result = self.transport.execute(request).await.and_then(classify);

        for interceptor in &self.interceptors {
            interceptor.after_receive(&result, target);
        }

        result
    }

    fn build_request(&self, endpoint: &Endpoint, mut headers: Vec<(String, String)>) -> TransportRequest {
        let mut url = endpoint.url(&self.config);
        let mut body = None;

        if let Some(parameters) = endpoint.parameters.as_ref().filter(|p| !p.is_empty()) {
            let encoded = form_encode(parameters);
            if endpoint.method.uses_query_parameters() {
                url.push(if url.contains('?') { '&' } else { '?' });
                url.push_str(&encoded);
            } else {
                headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
                body = Some(encoded);
            }
        }

        TransportRequest { method: endpoint.method, url, headers, body }
    }
}

/// Map a raw transport response to success or `HttpStatus` failure.
fn classify(response: TransportResponse) -> Result<ApiResponse> {
    if (200..400).contains(&response.status) {
        Ok(ApiResponse::from(response))
    } else {
        Err(ApiError::HttpStatus {
            status: response.status,
            url: response.url,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        })
    }
}

impl std::fmt::Debug for RequestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("origin", &self.config.base_origin())
            .field("gate", &self.gate)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> TransportResponse {
        TransportResponse {
            status,
            url: "https://api.artsy.net/api/v1/me".into(),
            location: None,
            body: b"body".to_vec(),
        }
    }

    #[test]
    fn test_classify_boundaries() {
        assert!(classify(response(200)).is_ok());
        assert!(classify(response(201)).is_ok());
        assert!(classify(response(302)).is_ok());
        assert!(classify(response(399)).is_ok());

        let err = classify(response(400)).unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.body(), Some("body"));

        assert_eq!(classify(response(404)).unwrap_err().status(), Some(404));
        assert!(classify(response(199)).is_err());
    }
}
