//! JSON file token store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bidkiosk_core::TokenStore;
use bidkiosk_domain::{ApiError, AppToken, Result};
use tracing::debug;

/// Persists the app token as a small JSON document
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AppToken>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No token file");
                return Ok(None);
            }
            Err(err) => {
                return Err(ApiError::Storage(format!(
                    "Failed to read {}: {err}",
                    self.path.display()
                )))
            }
        };

        serde_json::from_str(&contents).map(Some).map_err(|e| {
            ApiError::Storage(format!("Corrupt token file {}: {e}", self.path.display()))
        })
    }

    fn save(&self, token: &AppToken) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ApiError::Storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let contents = serde_json::to_string_pretty(token)
            .map_err(|e| ApiError::Storage(format!("Failed to encode token: {e}")))?;
        fs::write(&self.path, contents).map_err(|e| {
            ApiError::Storage(format!("Failed to write {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), "App token saved");
        Ok(())
    }
}
