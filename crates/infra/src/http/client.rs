use std::time::Duration;

use async_trait::async_trait;
use bidkiosk_core::{HttpTransport, TransportRequest, TransportResponse};
use bidkiosk_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use bidkiosk_domain::{ApiConfig, ApiError, HttpMethod, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, LOCATION};
use reqwest::redirect::Policy;
use reqwest::{Client as ReqwestClient, Method};
use tracing::debug;

use crate::errors::InfraError;

/// Production transport over `reqwest`.
///
/// Sends each request exactly once. No retries and no cookie store; redirects
/// are followed unless disabled on the builder.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Start building a new transport.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Transport configured from the client configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let mut builder = Self::builder().timeout(config.request_timeout());
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let method = to_reqwest_method(request.method);
        let mut builder = self.client.request(method.clone(), &request.url);

        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::Config(format!("Invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::Config(format!("Invalid value for header {name}: {e}")))?;
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        debug!(%method, url = %request.url, "sending HTTP request");

        let response = builder.send().await.map_err(|err| {
            debug!(%method, url = %request.url, error = %err, "HTTP request failed");
            ApiError::from(InfraError::from(err))
        })?;

        let status = response.status();
        let url = response.url().to_string();
        let location = if status.is_redirection() {
            response.headers().get(LOCATION).and_then(|v| v.to_str().ok()).map(str::to_string)
        } else {
            None
        };
        debug!(%method, %url, %status, "received HTTP response");

        let body = response.bytes().await.map_err(|err| ApiError::from(InfraError::from(err)))?;

        Ok(TransportResponse { status: status.as_u16(), url, location, body: body.to_vec() })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Head => Method::HEAD,
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
    follow_redirects: bool,
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
            follow_redirects: true,
        }
    }
}

impl ReqwestTransportBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// When disabled, a 3xx is returned as-is with its `Location`.
    pub fn follow_redirects(mut self, enabled: bool) -> Self {
        self.follow_redirects = enabled;
        self
    }

    pub fn build(self) -> Result<ReqwestTransport> {
        let policy = if self.follow_redirects { Policy::default() } else { Policy::none() };
        let mut builder = ReqwestClient::builder().timeout(self.timeout).redirect(policy).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| ApiError::from(InfraError::from(err)))?;

        Ok(ReqwestTransport { client })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn request(method: HttpMethod, url: String) -> TransportRequest {
        TransportRequest { method, url, headers: Vec::new(), body: None }
    }

    #[tokio::test]
    async fn sends_headers_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/sales"))
            .and(query_param("is_auction", "true"))
            .and(header("X-Xapp-Token", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().expect("transport");
        let mut req = request(HttpMethod::Get, format!("{}/api/v1/sales?is_auction=true", server.uri()));
        req.headers.push(("X-Xapp-Token".into(), "abc".into()));

        let response = transport.execute(req).await.expect("response");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"[]");
        assert!(response.location.is_none());
    }

    #[tokio::test]
    async fn sends_form_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/me/bidder_position"))
            .and(body_string("sale_id=s&artwork_id=a&max_bid_amount_cents=100"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().expect("transport");
        let mut req = request(HttpMethod::Post, format!("{}/api/v1/me/bidder_position", server.uri()));
        req.body = Some("sale_id=s&artwork_id=a&max_bid_amount_cents=100".into());

        let response = transport.execute(req).await.expect("response");
        assert_eq!(response.status, 201);
    }

    #[tokio::test]
    async fn does_not_interpret_error_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().expect("transport");
        let response =
            transport.execute(request(HttpMethod::Get, server.uri())).await.expect("response");

        assert_eq!(response.status, 500);
        assert_eq!(response.body, b"boom");
    }

    #[tokio::test]
    async fn follows_redirects_and_reports_final_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/bidder"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/api/v1/bidder/42", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/bidder/42"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().expect("transport");
        let response = transport
            .execute(request(HttpMethod::Get, format!("{}/api/v1/bidder", server.uri())))
            .await
            .expect("response");

        assert_eq!(response.status, 200);
        assert!(response.url.ends_with("/api/v1/bidder/42"));
    }

    #[tokio::test]
    async fn unfollowed_redirect_exposes_location() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/api/v1/bidder/42"))
            .mount(&server)
            .await;

        let transport =
            ReqwestTransport::builder().follow_redirects(false).build().expect("transport");
        let response = transport
            .execute(request(HttpMethod::Get, format!("{}/api/v1/bidder", server.uri())))
            .await
            .expect("response");

        assert_eq!(response.status, 302);
        assert_eq!(response.location.as_deref(), Some("/api/v1/bidder/42"));
    }

    #[tokio::test]
    async fn network_failure_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED

        let transport = ReqwestTransport::new().expect("transport");
        let result = transport.execute(request(HttpMethod::Get, format!("http://{addr}"))).await;

        match result {
            Err(ApiError::Transport { message, .. }) => {
                assert!(message.to_lowercase().contains("connection"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
