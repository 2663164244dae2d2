//! Reachability monitor
//!
//! Periodically probes the API host and publishes the result to a
//! [`ConnectivityGate`], with start/stop lifecycle management.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bidkiosk_core::ConnectivityGate;
use bidkiosk_domain::ApiConfig;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::error::MonitorError;

type TaskHandle = Arc<Mutex<Option<JoinHandle<()>>>>;

const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the reachability monitor
#[derive(Debug, Clone)]
pub struct ReachabilityConfig {
    /// Delay between probes
    pub interval: Duration,
    /// Give up on a single probe after this long
    pub probe_timeout: Duration,
}

impl Default for ReachabilityConfig {
    fn default() -> Self {
        Self { interval: Duration::from_secs(10), probe_timeout: Duration::from_secs(3) }
    }
}

/// One reachability check
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn probe(&self) -> bool;
}

/// Probe that opens (and drops) a TCP connection to the API host
#[derive(Debug, Clone)]
pub struct TcpProbe {
    address: String,
    timeout: Duration,
}

impl TcpProbe {
    #[must_use]
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self { address: address.into(), timeout }
    }

    /// Probe the host and port of the configured API origin.
    ///
    /// # Errors
    /// Returns `MonitorError::InvalidTarget` when the origin has no host or
    /// known port.
    pub fn for_config(config: &ApiConfig, timeout: Duration) -> Result<Self, MonitorError> {
        let origin = Url::parse(config.base_origin())
            .map_err(|e| MonitorError::InvalidTarget(e.to_string()))?;
        let host = origin
            .host_str()
            .ok_or_else(|| MonitorError::InvalidTarget(format!("{origin} has no host")))?;
        let port = origin
            .port_or_known_default()
            .ok_or_else(|| MonitorError::InvalidTarget(format!("{origin} has no port")))?;
        Ok(Self::new(format!("{host}:{port}"), timeout))
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl ReachabilityProbe for TcpProbe {
    async fn probe(&self) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.address)).await {
            Ok(Ok(_)) => true,
            Ok(Err(err)) => {
                debug!(address = %self.address, error = %err, "Reachability probe failed");
                false
            }
            Err(_) => {
                debug!(address = %self.address, "Reachability probe timed out");
                false
            }
        }
    }
}

/// Background task feeding probe results into the connectivity gate
pub struct ReachabilityMonitor {
    probe: Arc<dyn ReachabilityProbe>,
    gate: ConnectivityGate,
    config: ReachabilityConfig,
    cancellation_token: CancellationToken,
    task_handle: TaskHandle,
}

impl ReachabilityMonitor {
    pub fn new(
        probe: Arc<dyn ReachabilityProbe>,
        gate: ConnectivityGate,
        config: ReachabilityConfig,
    ) -> Self {
        Self {
            probe,
            gate,
            config,
            cancellation_token: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Monitor probing the configured API host over TCP.
    ///
    /// # Errors
    /// Returns `MonitorError::InvalidTarget` for an unusable origin.
    pub fn for_api(
        api: &ApiConfig,
        gate: ConnectivityGate,
        config: ReachabilityConfig,
    ) -> Result<Self, MonitorError> {
        let probe = TcpProbe::for_config(api, config.probe_timeout)?;
        Ok(Self::new(Arc::new(probe), gate, config))
    }

    /// Start probing; the first probe runs immediately.
    ///
    /// # Errors
    /// Returns `MonitorError::AlreadyRunning` if started twice.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), MonitorError> {
        if self.is_running().await {
            return Err(MonitorError::AlreadyRunning);
        }

        info!("Starting reachability monitor");

        // Fresh token so the monitor can be restarted after stop
        self.cancellation_token = CancellationToken::new();

        let probe = Arc::clone(&self.probe);
        let gate = self.gate.clone();
        let interval = self.config.interval;
        let cancel = self.cancellation_token.clone();

        let handle = tokio::spawn(async move {
            Self::probe_loop(probe, gate, interval, cancel).await;
        });

        *self.task_handle.lock().await = Some(handle);

        Ok(())
    }

    /// Stop probing and wait for the task to finish.
    ///
    /// # Errors
    /// Returns `MonitorError::NotRunning`, `Timeout` or `TaskJoinFailed`.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> Result<(), MonitorError> {
        if !self.is_running().await {
            return Err(MonitorError::NotRunning);
        }

        info!("Stopping reachability monitor");
        self.cancellation_token.cancel();

        if let Some(handle) = self.task_handle.lock().await.take() {
            match tokio::time::timeout(STOP_TIMEOUT, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!("Reachability task panicked: {}", e);
                    return Err(MonitorError::TaskJoinFailed(e.to_string()));
                }
                Err(_) => {
                    warn!("Reachability task did not complete within timeout");
                    return Err(MonitorError::Timeout { seconds: STOP_TIMEOUT.as_secs() });
                }
            }
        }

        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        self.task_handle.lock().await.is_some()
    }

    async fn probe_loop(
        probe: Arc<dyn ReachabilityProbe>,
        gate: ConnectivityGate,
        interval: Duration,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Reachability loop cancelled");
                    break;
                }
                online = probe.probe() => {
                    gate.set_online(online);
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Reachability loop cancelled");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }
}

impl Drop for ReachabilityMonitor {
    fn drop(&mut self) {
        if !self.cancellation_token.is_cancelled() {
            self.cancellation_token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    use tokio::net::TcpListener;

    use super::*;

    struct ScriptedProbe {
        answers: StdMutex<VecDeque<bool>>,
    }

    #[async_trait]
    impl ReachabilityProbe for ScriptedProbe {
        async fn probe(&self) -> bool {
            let mut answers = self.answers.lock().unwrap();
            if answers.len() > 1 {
                answers.pop_front().unwrap_or(false)
            } else {
                answers.front().copied().unwrap_or(false)
            }
        }
    }

    fn fast_config() -> ReachabilityConfig {
        ReachabilityConfig {
            interval: Duration::from_millis(5),
            probe_timeout: Duration::from_millis(100),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_monitor_lifecycle_publishes_probe_results() {
        let gate = ConnectivityGate::new(false);
        let probe = Arc::new(ScriptedProbe { answers: StdMutex::new(VecDeque::from([false, true])) });
        let mut monitor = ReachabilityMonitor::new(probe, gate.clone(), fast_config());

        monitor.start().await.unwrap();
        assert!(monitor.is_running().await);
        assert_eq!(monitor.start().await, Err(MonitorError::AlreadyRunning));

        tokio::time::timeout(Duration::from_secs(2), gate.wait_online()).await.unwrap().unwrap();

        monitor.stop().await.unwrap();
        assert!(!monitor.is_running().await);
        assert_eq!(monitor.stop().await, Err(MonitorError::NotRunning));
    }

    #[tokio::test]
    async fn test_tcp_probe_against_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let up = TcpProbe::new(addr.to_string(), Duration::from_millis(500));
        assert!(up.probe().await);

        drop(listener);
        let down = TcpProbe::new(addr.to_string(), Duration::from_millis(500));
        assert!(!down.probe().await);
    }

    #[test]
    fn test_probe_target_from_config() {
        let probe = TcpProbe::for_config(&ApiConfig::default(), Duration::from_secs(1)).unwrap();
        assert_eq!(probe.address(), "api.artsy.net:443");

        let local = ApiConfig {
            base_url_override: Some("http://127.0.0.1:8080".into()),
            ..ApiConfig::default()
        };
        let probe = TcpProbe::for_config(&local, Duration::from_secs(1)).unwrap();
        assert_eq!(probe.address(), "127.0.0.1:8080");
    }
}
