//! Port interfaces for HTTP transport

use async_trait::async_trait;
use bidkiosk_domain::{HttpMethod, Result};

/// Fully built request handed to a transport
///
/// The pipeline has already resolved the URL (query string included for
/// GET/HEAD), the headers and the form body; transports only send it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl TransportRequest {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response produced by a transport, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Final URL after any redirects the transport followed
    pub url: String,
    /// `Location` header of a redirect the transport did not follow
    pub location: Option<String>,
    pub body: Vec<u8>,
}

/// Trait for sending requests over the network
///
/// Implementations return `ApiError::Transport` for failures below HTTP and
/// never interpret status codes.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}
