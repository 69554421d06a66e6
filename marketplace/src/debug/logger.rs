//! File-based logging initialization

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::config::{LogConfig, DEFAULT_LOG_FILTER, LOG_FILE_PREFIX};
use crate::core::error::{ClientError, Result};

/// Initialize the logging system
///
/// Sets up:
/// - Daily log rotation in `config.log_dir`
/// - Non-blocking writes through the returned [`WorkerGuard`]
/// - Plain text or JSON lines, plus an optional stdout layer
/// - Panic hook integration for crash logging
///
/// Fails if the log directory cannot be created or a global subscriber is already set.
pub fn init(config: &LogConfig) -> Result<WorkerGuard> {
    fs::create_dir_all(&config.log_dir).map_err(|e| {
        ClientError::Config(format!(
            "failed to create log directory {}: {e}",
            config.log_dir.display()
        ))
    })?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let file_layer = if config.json {
        fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .boxed()
    };

    let stdout_layer = config
        .stdout
        .then(|| fmt::layer().with_target(false).compact().boxed());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| ClientError::Config(format!("logger already initialized: {e}")))?;

    tracing::info!(
        log_file = %config.log_file().display(),
        log_level = %config.log_level,
        json = config.json,
        "Logging initialized"
    );

    setup_panic_hook();

    Ok(guard)
}

/// Log panics with their location, then defer to the previous hook.
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());

        tracing::error!(location = %location, message = %message, "PANIC");

        default_panic(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        let dir = std::env::temp_dir().join(format!("marketplace-logs-{}", uuid::Uuid::new_v4()));
        let config = LogConfig {
            log_dir: dir.clone(),
            ..LogConfig::default()
        };

        let first = init(&config);
        let second = init(&config);

        // Another test binary may already own the global subscriber; either way
        // at most one of the two calls can succeed.
        assert!(!(first.is_ok() && second.is_ok()));
        assert!(matches!(second, Err(ClientError::Config(_))));
        assert!(dir.is_dir());

        drop(first);
        let _ = fs::remove_dir_all(dir);
    }
}
