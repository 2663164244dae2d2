//! Request/response logging interceptor
//!
//! Per-operation filters decide how much is logged:
//! - denied operations log nothing on request or success
//! - allowed operations log the response body on success
//! - everything else logs status and URL on success
//! - failures are always logged

use std::fmt;
use std::sync::Arc;

use bidkiosk_core::{ApiResponse, Interceptor, TransportRequest};
use bidkiosk_domain::{ApiTarget, GuestEndpoint, Result, UserEndpoint};
use tracing::{info, warn};

/// Predicate over an operation
pub type OperationFilter = Arc<dyn Fn(&ApiTarget) -> bool + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
}

/// A log line the interceptor decided to emit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    fn info(message: String) -> Self {
        Self { level: LogLevel::Info, message }
    }

    fn warn(message: String) -> Self {
        Self { level: LogLevel::Warn, message }
    }
}

/// Logging interceptor with allow and deny filters
#[derive(Clone)]
pub struct NetworkLogger {
    allow: OperationFilter,
    deny: OperationFilter,
}

impl NetworkLogger {
    pub fn new(allow: OperationFilter, deny: OperationFilter) -> Self {
        Self { allow, deny }
    }

    /// Coarse logs for every operation, nothing suppressed.
    #[must_use]
    pub fn log_everything() -> Self {
        Self::new(Arc::new(|_: &ApiTarget| false), Arc::new(|_: &ApiTarget| false))
    }

    /// Guest chain: connectivity pings are too chatty to log.
    #[must_use]
    pub fn guest_default() -> Self {
        Self::new(
            Arc::new(|_: &ApiTarget| false),
            Arc::new(|target: &ApiTarget| matches!(target, ApiTarget::Guest(GuestEndpoint::Ping))),
        )
    }

    /// User chain: bid position polling logs full bodies.
    #[must_use]
    pub fn user_default() -> Self {
        Self::new(
            Arc::new(|target: &ApiTarget| matches!(target, ApiTarget::User(UserEndpoint::MyBidPosition { .. }))),
            Arc::new(|_: &ApiTarget| false),
        )
    }

    pub fn request_entry(&self, request: &TransportRequest, target: &ApiTarget) -> Option<LogEntry> {
        if (self.deny)(target) {
            return None;
        }
        Some(LogEntry::info(format!("Request ({target}): {} {}", request.method, request.url)))
    }

    pub fn response_entry(&self, result: &Result<ApiResponse>, target: &ApiTarget) -> Option<LogEntry> {
        match result {
            Ok(_) if (self.deny)(target) => None,
            Ok(response) if (self.allow)(target) => Some(LogEntry::info(format!(
                "Response ({target}): {} {}\n{}",
                response.status(),
                response.url(),
                response.text()
            ))),
            Ok(response) => Some(LogEntry::info(format!(
                "Response ({target}): {} {}",
                response.status(),
                response.url()
            ))),
            Err(err) => {
                let mut message = format!("Error ({target}): {err}");
                if let Some(body) = err.body().filter(|b| !b.is_empty()) {
                    message.push('\n');
                    message.push_str(body);
                }
                Some(LogEntry::warn(message))
            }
        }
    }

    fn emit(entry: LogEntry, target: &ApiTarget) {
        match entry.level {
            LogLevel::Info => info!(operation = target.name(), "{}", entry.message),
            LogLevel::Warn => warn!(operation = target.name(), "{}", entry.message),
        }
    }
}

impl Interceptor for NetworkLogger {
    fn before_send(&self, request: &TransportRequest, target: &ApiTarget) {
        if let Some(entry) = self.request_entry(request, target) {
            Self::emit(entry, target);
        }
    }

    fn after_receive(&self, result: &Result<ApiResponse>, target: &ApiTarget) {
        if let Some(entry) = self.response_entry(result, target) {
            Self::emit(entry, target);
        }
    }
}

impl fmt::Debug for NetworkLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkLogger").finish_non_exhaustive()
    }
}
