//! HTTP transports

pub mod client;
pub mod stub;

pub use client::{ReqwestTransport, ReqwestTransportBuilder};
pub use stub::StubTransport;
