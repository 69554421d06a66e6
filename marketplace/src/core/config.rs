//! # Client Configuration
//!
//! Configuration loaded from environment variables. Malformed values fall back to the
//! defaults with a warning instead of aborting startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `MARKET_API_URL` | `http://127.0.0.1:3001` |
//! | `MARKET_HTTP_TIMEOUT_SECS` | `10` |
//! | `MARKET_STORAGE_PATH` | `data/client-storage.json` |
//! | `MARKET_AUTH_RETRY_DELAY_MS` | `100` |
//! | `MARKET_PENDING_TTL_SECS` | unset (pending actions never expire) |
//! | `MARKET_REQUIRE_AUTH` | `true` |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use lib_utils::envs::{self, get_env, get_env_bool, get_env_parse};
use lib_utils::validation::validate_url;

use crate::core::error::{ClientError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3001";
pub const DEFAULT_STORAGE_PATH: &str = "data/client-storage.json";

/// Delay before a deferred action is replayed after sign-in, so the auth UI can unmount first
pub const CLICK_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL (no trailing slash)
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// JSON file backing client storage
    pub storage_path: PathBuf,
    pub auth_retry_delay: Duration,
    /// Discard pending actions older than this when sign-in completes
    pub pending_ttl: Option<Duration>,
    pub require_auth: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            auth_retry_delay: CLICK_RETRY_DELAY,
            pending_ttl: None,
            require_auth: true,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_base_url = get_env("MARKET_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let request_timeout = env_or("MARKET_HTTP_TIMEOUT_SECS", 10u64)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let storage_path = get_env("MARKET_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_path);

        let auth_retry_delay = env_or("MARKET_AUTH_RETRY_DELAY_MS", 100u64)
            .map(Duration::from_millis)
            .unwrap_or(defaults.auth_retry_delay);

        let pending_ttl = match get_env_parse::<u64>("MARKET_PENDING_TTL_SECS") {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(envs::Error::MissingEnv(_)) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed MARKET_PENDING_TTL_SECS");
                None
            }
        };

        let require_auth = match get_env_bool("MARKET_REQUIRE_AUTH") {
            Ok(value) => value,
            Err(envs::Error::MissingEnv(_)) => defaults.require_auth,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed MARKET_REQUIRE_AUTH");
                defaults.require_auth
            }
        };

        Self {
            api_base_url,
            request_timeout,
            storage_path,
            auth_retry_delay,
            pending_ttl,
            require_auth,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        validate_url(&self.api_base_url, "MARKET_API_URL").map_err(ClientError::Config)?;
        if self.request_timeout.is_zero() {
            return Err(ClientError::Config(
                "MARKET_HTTP_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parsed value, or `Some(default)` with a warning when the variable is malformed.
fn env_or<T: FromStr>(name: &'static str, default: T) -> Option<T> {
    match get_env_parse::<T>(name) {
        Ok(value) => Some(value),
        Err(envs::Error::MissingEnv(_)) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed environment value");
            Some(default)
        }
    }
}
