//! Client Configuration
//!
//! Where the API lives, where the token is persisted, and timing knobs.

use std::path::PathBuf;
use std::time::Duration;

pub const ENV_API_BASE_URL: &str = "SKILLSLAB_API_BASE_URL";
pub const ENV_TOKEN_PATH: &str = "SKILLSLAB_TOKEN_PATH";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "SKILLSLAB_REQUEST_TIMEOUT_SECS";
pub const ENV_POLL_INTERVAL_MS: &str = "SKILLSLAB_POLL_INTERVAL_MS";
pub const ENV_POLL_MAX_ATTEMPTS: &str = "SKILLSLAB_POLL_MAX_ATTEMPTS";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, including the version prefix
    pub api_base_url: String,
    /// File holding persisted client state (the bearer token)
    pub token_storage_path: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Delay between submission status polls
    pub poll_interval: Duration,
    /// Poll attempts before giving up on a verdict
    pub poll_max_attempts: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            token_storage_path: default_storage_path(),
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(1000),
            poll_max_attempts: 60,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `SKILLSLAB_*` environment variables
    ///
    /// Malformed numeric values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Local development: short timeouts, fast polling
    pub fn development() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(250),
            ..Self::default()
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: lookup(ENV_API_BASE_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.api_base_url),
            token_storage_path: lookup(ENV_TOKEN_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.token_storage_path),
            request_timeout: parse_or(&lookup, ENV_REQUEST_TIMEOUT_SECS)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            poll_interval: parse_or(&lookup, ENV_POLL_INTERVAL_MS)
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            poll_max_attempts: parse_or(&lookup, ENV_POLL_MAX_ATTEMPTS)
                .unwrap_or(defaults.poll_max_attempts),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring malformed configuration value");
            None
        }
    }
}

fn default_storage_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".config")
            .join("skillslab")
            .join("storage.json"),
        None => PathBuf::from(".skillslab-storage.json"),
    }
}
