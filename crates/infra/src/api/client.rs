//! Guest and user API clients
//!
//! Thin typed wrappers over the shared request pipeline. The guest client
//! sends the unauthenticated catalog; the authorized client sends the user
//! catalog with its session headers.

use std::sync::Arc;

use async_trait::async_trait;
use bidkiosk_core::{
    classify_bidder_lookup, ApiResponse, AppTokenCache, AuthorizedRequests, ConnectivityGate,
    RequestPipeline, UserSession,
};
use bidkiosk_domain::{
    ApiTarget, BidderCredentials, BidderLookup, GuestEndpoint, PaddleCredentials, Result,
    UserAuth, UserEndpoint,
};
use tracing::{debug, instrument};

/// Client for guest (app token) operations
#[derive(Debug, Clone)]
pub struct ApiClient {
    pipeline: Arc<RequestPipeline>,
}

impl ApiClient {
    #[must_use]
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self { pipeline }
    }

    /// Send a guest operation.
    ///
    /// # Errors
    /// Any [`bidkiosk_domain::ApiError`] the pipeline classifies.
    #[instrument(skip_all, fields(operation = endpoint.name()))]
    pub async fn request(&self, endpoint: GuestEndpoint) -> Result<ApiResponse> {
        self.pipeline.request(ApiTarget::Guest(endpoint), &[]).await
    }

    /// Check whether a phone number is registered to bid in an auction.
    ///
    /// The server answers an existing registration with a redirect to the
    /// bidder resource; failures are classified the same way.
    #[instrument(skip(self, phone))]
    pub async fn find_bidder_registration(&self, auction_id: &str, phone: &str) -> BidderLookup {
        let result = self
            .request(GuestEndpoint::FindBidderRegistration {
                auction_id: auction_id.to_string(),
                phone: phone.to_string(),
            })
            .await;
        let lookup = classify_bidder_lookup(&result);
        debug!(?lookup, "Classified bidder registration lookup");
        lookup
    }

    #[must_use]
    pub fn token_cache(&self) -> &Arc<AppTokenCache> {
        self.pipeline.token_cache()
    }

    #[must_use]
    pub fn gate(&self) -> &ConnectivityGate {
        self.pipeline.gate()
    }

    #[must_use]
    pub fn pipeline(&self) -> &Arc<RequestPipeline> {
        &self.pipeline
    }
}

/// Client for operations that need a signed-in bidder
#[derive(Debug, Clone)]
pub struct AuthorizedApiClient {
    session: UserSession,
}

impl AuthorizedApiClient {
    #[must_use]
    pub fn new(session: UserSession) -> Self {
        Self { session }
    }

    /// Session authorized by paddle number and PIN headers.
    #[must_use]
    pub fn from_paddle_and_pin(pipeline: Arc<RequestPipeline>, credentials: PaddleCredentials) -> Self {
        Self::new(UserSession::from_paddle_and_pin(pipeline, credentials))
    }

    /// Session authorized by an access token exchanged through `guest`.
    ///
    /// # Errors
    /// The exchange failure, or `JsonParse` when no access token comes back.
    pub async fn from_credentials(
        pipeline: Arc<RequestPipeline>,
        guest: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<Self> {
        UserSession::from_credentials(pipeline, guest.pipeline(), email, password).await.map(Self::new)
    }

    /// Session for whatever the bidder entered.
    ///
    /// # Errors
    /// See [`UserSession::resolve`].
    pub async fn resolve(
        pipeline: Arc<RequestPipeline>,
        guest: &ApiClient,
        credentials: &BidderCredentials,
    ) -> Result<Self> {
        UserSession::resolve(pipeline, guest.pipeline(), credentials).await.map(Self::new)
    }

    /// Send a user operation with this session's headers.
    ///
    /// # Errors
    /// Any [`bidkiosk_domain::ApiError`] the pipeline classifies.
    #[instrument(skip_all, fields(operation = endpoint.name()))]
    pub async fn request(&self, endpoint: UserEndpoint) -> Result<ApiResponse> {
        AuthorizedRequests::request(&self.session, endpoint).await
    }

    #[must_use]
    pub fn auth(&self) -> &UserAuth {
        self.session.auth()
    }

    #[must_use]
    pub fn session(&self) -> &UserSession {
        &self.session
    }
}

#[async_trait]
impl AuthorizedRequests for AuthorizedApiClient {
    fn auth(&self) -> &UserAuth {
        self.session.auth()
    }

    async fn request(&self, endpoint: UserEndpoint) -> Result<ApiResponse> {
        Self::request(self, endpoint).await
    }
}
