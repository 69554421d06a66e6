//! Logging configuration from environment variables

use std::path::PathBuf;

use lib_utils::envs::{get_env, get_env_bool};

pub const DEFAULT_LOG_FILTER: &str = "marketplace=info,warn";
pub const LOG_FILE_PREFIX: &str = "marketplace.log";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level filter (e.g., "marketplace=debug,info")
    pub log_level: String,
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Emit JSON lines instead of plain text
    pub json: bool,
    /// Also log to stdout
    pub stdout: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_FILTER.to_string(),
            log_dir: PathBuf::from("logs"),
            json: false,
            stdout: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: get_env("RUST_LOG").unwrap_or(defaults.log_level),
            log_dir: get_env("MARKET_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            json: get_env_bool("MARKET_LOG_JSON").unwrap_or(defaults.json),
            stdout: get_env_bool("MARKET_LOG_STDOUT").unwrap_or(defaults.stdout),
        }
    }

    /// Path of today's log file prefix inside the log directory
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_PREFIX)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.log_level, "marketplace=info,warn");
        assert_eq!(config.log_file(), PathBuf::from("logs/marketplace.log"));
        assert!(!config.is_debug_enabled());
    }

    #[test]
    fn test_debug_detection() {
        let config = LogConfig {
            log_level: "marketplace=debug".into(),
            ..LogConfig::default()
        };
        assert!(config.is_debug_enabled());
    }
}
