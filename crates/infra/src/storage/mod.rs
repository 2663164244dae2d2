//! App token persistence adapters

pub mod file;
#[cfg(feature = "keychain")]
pub mod keychain;
pub mod memory;

pub use file::FileTokenStore;
#[cfg(feature = "keychain")]
pub use keychain::KeychainTokenStore;
pub use memory::MemoryTokenStore;
