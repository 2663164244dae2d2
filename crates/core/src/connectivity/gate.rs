//! Connectivity gate
//!
//! A single process-wide online flag. Requests wait for the flag to read
//! `true` before they are dispatched; while offline they are held, not failed.

use std::sync::Arc;
use std::time::Duration;

use bidkiosk_domain::{ApiError, Result};
use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tracing::{debug, info};

/// Shared online/offline signal
///
/// Cloning is cheap; every clone publishes to and reads from the same flag.
#[derive(Clone)]
pub struct ConnectivityGate {
    sender: Arc<watch::Sender<bool>>,
    timeout: Option<Duration>,
}

impl ConnectivityGate {
    #[must_use]
    pub fn new(initially_online: bool) -> Self {
        let (sender, _) = watch::channel(initially_online);
        Self { sender: Arc::new(sender), timeout: None }
    }

    /// Gate that starts online; stubbed and test setups use this.
    #[must_use]
    pub fn always_online() -> Self {
        Self::new(true)
    }

    /// Fail waits that last longer than `timeout`; `None` waits forever.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Publish the current reachability.
    pub fn set_online(&self, online: bool) {
        let previous = self.sender.send_replace(online);
        if previous != online {
            info!(online, "Connectivity changed");
        }
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        *self.sender.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }

    /// Resolve once the flag reads `true`.
    ///
    /// Each caller subscribes independently and completes exactly once,
    /// no matter how many `true` values are published afterwards.
    ///
    /// # Errors
    /// Returns `ApiError::ConnectivityTimeout` when a timeout is configured
    /// and elapses first.
    pub async fn wait_online(&self) -> Result<()> {
        let mut receiver = self.sender.subscribe();
        if *receiver.borrow_and_update() {
            return Ok(());
        }

        debug!("Offline, holding request until connectivity returns");
        let wait = async move {
            receiver.wait_for(|online| *online).await.map(|_| ()).map_err(|_| {
                ApiError::Transport {
                    url: None,
                    message: "connectivity signal closed".to_string(),
                    is_redirect: false,
                }
            })
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, wait)
                .await
                .map_err(|_| ApiError::ConnectivityTimeout(limit))?,
            None => wait.await,
        }
    }

    /// Pump an external reachability stream into the gate until it ends.
    pub async fn forward<S>(&self, signals: S)
    where
        S: Stream<Item = bool> + Send,
    {
        let mut signals = std::pin::pin!(signals);
        while let Some(online) = signals.next().await {
            self.set_online(online);
        }
        debug!("Reachability stream ended");
    }
}

impl std::fmt::Debug for ConnectivityGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectivityGate")
            .field("online", &self.is_online())
            .field("timeout", &self.timeout)
            .finish()
    }
}
