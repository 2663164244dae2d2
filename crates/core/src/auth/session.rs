//! Authenticated session resolution
//!
//! A user session is created one of two ways:
//! - Paddle number and PIN: static headers, no network call
//! - Email and password: one `XAuth` exchange for an access token
//!
//! The choice is made once, by presence of paddle number and PIN.

use std::sync::Arc;

use async_trait::async_trait;
use bidkiosk_domain::{
    AccessTokenResponse, ApiError, ApiTarget, BidderCredentials, GuestEndpoint, PaddleCredentials,
    Result, UserAuth, UserEndpoint,
};
use tracing::{info, instrument};

use crate::http::ApiResponse;
use crate::pipeline::RequestPipeline;

/// Capability shared by every authenticated session
#[async_trait]
pub trait AuthorizedRequests: Send + Sync {
    /// How this session authorizes requests
    fn auth(&self) -> &UserAuth;

    /// Send an authenticated-catalog request
    async fn request(&self, endpoint: UserEndpoint) -> Result<ApiResponse>;
}

/// User session bound to a request pipeline
#[derive(Debug, Clone)]
pub struct UserSession {
    pipeline: Arc<RequestPipeline>,
    auth: UserAuth,
}

impl UserSession {
    /// Session authorized by paddle headers. Makes no network call.
    #[must_use]
    pub fn from_paddle_and_pin(
        pipeline: Arc<RequestPipeline>,
        credentials: PaddleCredentials,
    ) -> Self {
        info!(auction_id = %credentials.auction_id, "Using paddle number session");
        Self { pipeline, auth: UserAuth::Paddle(credentials) }
    }

    /// Exchange email and password for an access token.
    ///
    /// `exchange` is the pipeline that carries the `XAuth` request; it is
    /// usually the guest pipeline so the exchange is logged like any other
    /// guest call. The session itself sends through `pipeline`.
    ///
    /// # Errors
    /// Propagates the exchange failure; `JsonParse` when the response has no
    /// `access_token`.
    #[instrument(skip_all)]
    pub async fn from_credentials(
        pipeline: Arc<RequestPipeline>,
        exchange: &RequestPipeline,
        email: &str,
        password: &str,
    ) -> Result<Self> {
        let target = ApiTarget::Guest(GuestEndpoint::XAuth {
            email: email.to_string(),
            password: password.to_string(),
        });
        let response = exchange.request(target, &[]).await?;
        let payload: AccessTokenResponse = response.json()?;

        info!("Exchanged credentials for access token");
        Ok(Self { pipeline, auth: UserAuth::AccessToken(payload.access_token) })
    }

    /// Pick the session path for what the bidder entered.
    ///
    /// Paddle + PIN wins when both are present. A half-filled pair (a paddle
    /// without its PIN, or an email without its password) is never sent to
    /// the credential exchange with blanks filled in.
    ///
    /// # Errors
    /// `Config` when neither paddle + PIN nor email + password are present,
    /// otherwise whatever [`UserSession::from_credentials`] returns.
    pub async fn resolve(
        pipeline: Arc<RequestPipeline>,
        exchange: &RequestPipeline,
        credentials: &BidderCredentials,
    ) -> Result<Self> {
        if let Some((number, pin)) = credentials.paddle_and_pin() {
            let paddle = PaddleCredentials::new(number, pin, credentials.auction_id.clone());
            return Ok(Self::from_paddle_and_pin(pipeline, paddle));
        }

        match (credentials.email.as_deref(), credentials.password.as_deref()) {
            (Some(email), Some(password)) => {
                Self::from_credentials(pipeline, exchange, email, password).await
            }
            _ => Err(ApiError::Config(
                "Bidder credentials need paddle number and PIN, or email and password".to_string(),
            )),
        }
    }

    pub fn pipeline(&self) -> &Arc<RequestPipeline> {
        &self.pipeline
    }
}

#[async_trait]
impl AuthorizedRequests for UserSession {
    fn auth(&self) -> &UserAuth {
        &self.auth
    }

    async fn request(&self, endpoint: UserEndpoint) -> Result<ApiResponse> {
        self.pipeline.request(ApiTarget::User(endpoint), &self.auth.headers()).await
    }
}
