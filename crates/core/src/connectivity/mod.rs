//! Connectivity gating for outgoing requests

pub mod gate;

pub use gate::ConnectivityGate;
