//! Networking assembly
//!
//! Wires configuration, transport, connectivity gate, token store and the
//! default interceptor chains into a guest client, and hands out authorized
//! clients that share the same transport, gate and token cache.

use std::sync::Arc;

use bidkiosk_core::{
    AppTokenCache, ConnectivityGate, HttpTransport, Interceptor, RequestPipeline, TokenStore,
};
use bidkiosk_domain::{ApiConfig, BidderCredentials, PaddleCredentials, Result};
use tracing::info;

use super::client::{ApiClient, AuthorizedApiClient};
use crate::connectivity::{MonitorError, ReachabilityConfig, ReachabilityMonitor};
use crate::http::{ReqwestTransport, StubTransport};
use crate::observability::network_logger::NetworkLogger;
use crate::storage::MemoryTokenStore;

/// Entry point for talking to the auction API
#[derive(Debug, Clone)]
pub struct Networking {
    guest: ApiClient,
    user_pipeline: Arc<RequestPipeline>,
}

impl Networking {
    /// Production networking from configuration.
    ///
    /// Uses the reqwest transport (or the stub transport when
    /// `stub_responses` is set), a gate that starts online and honors
    /// `connectivity_timeout_secs`, and the platform token store.
    ///
    /// # Errors
    /// `Config` when the configuration is invalid or the HTTP client cannot be
    /// built.
    pub fn from_config(config: ApiConfig) -> Result<Self> {
        Self::with_token_store(config, default_token_store())
    }

    /// Like [`Networking::from_config`] with an explicit token store.
    ///
    /// # Errors
    /// See [`Networking::from_config`].
    pub fn with_token_store(config: ApiConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        config.validate()?;

        let transport: Arc<dyn HttpTransport> = if config.stub_responses {
            info!("Serving stubbed API responses");
            Arc::new(StubTransport::new())
        } else {
            Arc::new(ReqwestTransport::from_config(&config)?)
        };
        let gate = ConnectivityGate::new(true).with_timeout(config.connectivity_timeout());

        info!(origin = config.base_origin(), "Networking configured");
        Ok(Self::assemble(config, transport, gate, store))
    }

    /// Offline networking answering from sample responses.
    ///
    /// Always online, tokens kept in memory only.
    #[must_use]
    pub fn stubbed(config: ApiConfig) -> Self {
        Self::assemble(
            config,
            Arc::new(StubTransport::new()),
            ConnectivityGate::always_online(),
            Arc::new(MemoryTokenStore::new()),
        )
    }

    /// Networking over caller-supplied parts with the default logging chains.
    #[must_use]
    pub fn assemble(
        config: ApiConfig,
        transport: Arc<dyn HttpTransport>,
        gate: ConnectivityGate,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        Self::assemble_with_chains(
            config,
            transport,
            gate,
            store,
            vec![Arc::new(NetworkLogger::guest_default())],
            vec![Arc::new(NetworkLogger::user_default())],
        )
    }

    /// Networking with explicit guest and user interceptor chains.
    #[must_use]
    pub fn assemble_with_chains(
        config: ApiConfig,
        transport: Arc<dyn HttpTransport>,
        gate: ConnectivityGate,
        store: Arc<dyn TokenStore>,
        guest_chain: Vec<Arc<dyn Interceptor>>,
        user_chain: Vec<Arc<dyn Interceptor>>,
    ) -> Self {
        let token_cache = Arc::new(AppTokenCache::new(store));
        let base = RequestPipeline::new(Arc::new(config), transport, gate, token_cache);

        let user_pipeline = Arc::new(base.with_interceptors(user_chain));
        let guest_pipeline = Arc::new(base.with_interceptors(guest_chain));

        Self { guest: ApiClient::new(guest_pipeline), user_pipeline }
    }

    /// Client for guest operations.
    #[must_use]
    pub fn guest(&self) -> &ApiClient {
        &self.guest
    }

    /// Authorized client using paddle number and PIN headers.
    #[must_use]
    pub fn authorize_with_paddle(&self, credentials: PaddleCredentials) -> AuthorizedApiClient {
        AuthorizedApiClient::from_paddle_and_pin(Arc::clone(&self.user_pipeline), credentials)
    }

    /// Authorized client using an access token exchanged for email and password.
    ///
    /// # Errors
    /// The exchange failure, or `JsonParse` when no access token comes back.
    pub async fn authorize_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthorizedApiClient> {
        AuthorizedApiClient::from_credentials(
            Arc::clone(&self.user_pipeline),
            &self.guest,
            email,
            password,
        )
        .await
    }

    /// Authorized client for whatever the bidder entered.
    ///
    /// # Errors
    /// `Config` when neither credential pair is complete, otherwise the
    /// exchange failure.
    pub async fn authorize(&self, credentials: &BidderCredentials) -> Result<AuthorizedApiClient> {
        AuthorizedApiClient::resolve(Arc::clone(&self.user_pipeline), &self.guest, credentials).await
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        self.user_pipeline.config()
    }

    #[must_use]
    pub fn gate(&self) -> &ConnectivityGate {
        self.guest.gate()
    }

    #[must_use]
    pub fn token_cache(&self) -> &Arc<AppTokenCache> {
        self.guest.token_cache()
    }

    /// Monitor that probes the configured API host and feeds this gate.
    ///
    /// # Errors
    /// `InvalidTarget` when the origin has no usable host.
    pub fn reachability_monitor(
        &self,
        config: ReachabilityConfig,
    ) -> std::result::Result<ReachabilityMonitor, MonitorError> {
        ReachabilityMonitor::for_api(self.config(), self.gate().clone(), config)
    }
}

#[cfg(feature = "keychain")]
fn default_token_store() -> Arc<dyn TokenStore> {
    Arc::new(crate::storage::KeychainTokenStore::default())
}

#[cfg(not(feature = "keychain"))]
fn default_token_store() -> Arc<dyn TokenStore> {
    Arc::new(MemoryTokenStore::new())
}
