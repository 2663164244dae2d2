//! Transport port and the typed success response

pub mod ports;
pub mod response;

pub use ports::*;
pub use response::ApiResponse;
