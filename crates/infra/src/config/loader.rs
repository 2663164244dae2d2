//! Configuration loader
//!
//! Loads the API client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the client keys are not set there, falls back to a config file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `BIDKIOSK_CLIENT_KEY`: API client key (required)
//! - `BIDKIOSK_CLIENT_SECRET`: API client secret (required)
//! - `BIDKIOSK_USE_STAGING`: Talk to the staging host (true/false)
//! - `BIDKIOSK_STUB_RESPONSES`: Serve canned responses (true/false)
//! - `BIDKIOSK_BASE_URL`: Replace the API origin
//! - `BIDKIOSK_REQUEST_TIMEOUT`: Request timeout in seconds
//! - `BIDKIOSK_CONNECTIVITY_TIMEOUT`: Give up waiting for connectivity after
//!   this many seconds
//! - `BIDKIOSK_USER_AGENT`: User agent header
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./bidkiosk.json` or `./bidkiosk.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use bidkiosk_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use bidkiosk_domain::{ApiConfig, ApiError, ApiKeys, Result};

use crate::errors::InfraError;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the client keys are
/// missing, falls back to loading from a config file. The result is
/// validated either way.
///
/// # Errors
/// Returns `ApiError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load() -> Result<ApiConfig> {
    let config = if env_keys_present() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        config
    } else {
        tracing::debug!("Client keys not in environment, trying file");
        load_from_file(None)?
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// The client key and secret must be present; everything else falls back to
/// the defaults.
///
/// # Errors
/// Returns `ApiError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<ApiConfig> {
    let keys = ApiKeys::new(env_var("BIDKIOSK_CLIENT_KEY")?, env_var("BIDKIOSK_CLIENT_SECRET")?);

    let request_timeout_secs = env_u64("BIDKIOSK_REQUEST_TIMEOUT")?.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    let connectivity_timeout_secs = env_u64("BIDKIOSK_CONNECTIVITY_TIMEOUT")?;

    Ok(ApiConfig {
        use_staging: env_bool("BIDKIOSK_USE_STAGING", false),
        base_url_override: env_opt("BIDKIOSK_BASE_URL"),
        keys,
        stub_responses: env_bool("BIDKIOSK_STUB_RESPONSES", false),
        request_timeout_secs,
        connectivity_timeout_secs,
        user_agent: env_opt("BIDKIOSK_USER_AGENT"),
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ApiError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ApiConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ApiError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ApiError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ApiError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ApiConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents).map_err(|e| InfraError::from(e).into()),
        _ => Err(ApiError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("bidkiosk.json"),
        dir.join("bidkiosk.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
    ]
}

/// Get required environment variable
/// Environment configuration is used only when both client keys are set.
fn env_keys_present() -> bool {
    std::env::var_os("BIDKIOSK_CLIENT_KEY").is_some()
        && std::env::var_os("BIDKIOSK_CLIENT_SECRET").is_some()
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| ApiError::Config(format!("Missing required environment variable: {key}")))
}

/// Optional, non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| ApiError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: [&str; 8] = [
        "BIDKIOSK_CLIENT_KEY",
        "BIDKIOSK_CLIENT_SECRET",
        "BIDKIOSK_USE_STAGING",
        "BIDKIOSK_STUB_RESPONSES",
        "BIDKIOSK_BASE_URL",
        "BIDKIOSK_REQUEST_TIMEOUT",
        "BIDKIOSK_CONNECTIVITY_TIMEOUT",
        "BIDKIOSK_USER_AGENT",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("BIDKIOSK_TEST_BOOL_YES", "YES");
        std::env::set_var("BIDKIOSK_TEST_BOOL_OFF", "off");

        assert!(env_bool("BIDKIOSK_TEST_BOOL_YES", false));
        assert!(!env_bool("BIDKIOSK_TEST_BOOL_OFF", true));
        assert!(env_bool("BIDKIOSK_TEST_BOOL_MISSING", true));

        std::env::remove_var("BIDKIOSK_TEST_BOOL_YES");
        std::env::remove_var("BIDKIOSK_TEST_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("BIDKIOSK_CLIENT_KEY", "kiosk-key");
        std::env::set_var("BIDKIOSK_CLIENT_SECRET", "kiosk-secret");
        std::env::set_var("BIDKIOSK_USE_STAGING", "true");
        std::env::set_var("BIDKIOSK_STUB_RESPONSES", "1");
        std::env::set_var("BIDKIOSK_BASE_URL", "http://127.0.0.1:9000");
        std::env::set_var("BIDKIOSK_REQUEST_TIMEOUT", "12");
        std::env::set_var("BIDKIOSK_CONNECTIVITY_TIMEOUT", "60");
        std::env::set_var("BIDKIOSK_USER_AGENT", "kiosk/1.0");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.keys, ApiKeys::new("kiosk-key", "kiosk-secret"));
        assert!(config.use_staging);
        assert!(config.stub_responses);
        assert_eq!(config.base_url_override.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(config.request_timeout_secs, 12);
        assert_eq!(config.connectivity_timeout_secs, Some(60));
        assert_eq!(config.user_agent.as_deref(), Some("kiosk/1.0"));
    }

    #[test]
    fn test_load_from_env_defaults_optional_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("BIDKIOSK_CLIENT_KEY", "kiosk-key");
        std::env::set_var("BIDKIOSK_CLIENT_SECRET", "kiosk-secret");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert!(!config.use_staging);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.connectivity_timeout_secs, None);
    }

    #[test]
    fn test_load_from_env_missing_keys() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, ApiError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("BIDKIOSK_CLIENT_KEY", "kiosk-key");
        std::env::set_var("BIDKIOSK_CLIENT_SECRET", "kiosk-secret");
        std::env::set_var("BIDKIOSK_REQUEST_TIMEOUT", "soon");

        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_load_reports_invalid_env_value_instead_of_using_file() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("BIDKIOSK_CLIENT_KEY", "kiosk-key");
        std::env::set_var("BIDKIOSK_CLIENT_SECRET", "kiosk-secret");
        std::env::set_var("BIDKIOSK_REQUEST_TIMEOUT", "abc");

        let result = load();
        clear_env();

        match result {
            Err(ApiError::Config(message)) => {
                assert!(message.contains("BIDKIOSK_REQUEST_TIMEOUT"), "got {message}");
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{
                "use_staging": true,
                "keys": {{ "key": "kiosk-key", "secret": "kiosk-secret" }},
                "connectivity_timeout_secs": 30
            }}"#
        )
        .unwrap();

        let config = load_from_file(Some(file.path().to_path_buf())).unwrap();
        assert!(config.use_staging);
        assert_eq!(config.keys.secret, "kiosk-secret");
        assert_eq!(config.connectivity_timeout_secs, Some(30));
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_from_file_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
stub_responses = true
request_timeout_secs = 5

[keys]
key = "kiosk-key"
secret = "kiosk-secret"
"#
        )
        .unwrap();

        let config = load_from_file(Some(file.path().to_path_buf())).unwrap();
        assert!(config.stub_responses);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.keys.key, "kiosk-key");
    }

    #[test]
    fn test_load_from_file_invalid_format() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "keys = [not toml").unwrap();

        let err = load_from_file(Some(file.path().to_path_buf())).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_load_from_file_missing_path() {
        let err = load_from_file(Some(PathBuf::from("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("yaml");
        assert!(parse_config("", &path).is_err());
    }
}
