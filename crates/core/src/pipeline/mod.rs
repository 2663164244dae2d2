//! Request pipeline: gate, token check, dispatch, classify

pub mod interceptor;
pub mod service;

pub use interceptor::Interceptor;
pub use service::RequestPipeline;
