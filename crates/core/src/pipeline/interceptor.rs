//! Request observers

use bidkiosk_domain::{ApiTarget, Result};

use crate::http::{ApiResponse, TransportRequest};

/// Observer invoked around every dispatched request
///
/// Interceptors see the built request and the classified outcome but cannot
/// change either. Both hooks default to no-ops.
pub trait Interceptor: Send + Sync {
    /// Called right before the transport is invoked
    fn before_send(&self, _request: &TransportRequest, _target: &ApiTarget) {}

    /// Called with the classified outcome of every dispatch
    fn after_receive(&self, _result: &Result<ApiResponse>, _target: &ApiTarget) {}
}
