//! # Logging Infrastructure
//!
//! File-based structured logging for the marketplace client.
//!
//! ## Features
//!
//! - **File-based logging**: `logs/marketplace.log.<date>` with daily rotation
//! - **Non-blocking writes**: log I/O never stalls the async runtime
//! - **JSON output**: optional, for log shippers (`MARKET_LOG_JSON=1`)
//! - **Panic hook**: panics are written to the log before the default handler runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! let _guard = marketplace::debug::init()?;
//!
//! tracing::info!(label = "like", "Action executed");
//! ```
//!
//! Keep the returned guard alive for the lifetime of the program; dropping it flushes
//! and stops the background writer.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default `marketplace=info,warn`)
//! - `MARKET_LOG_DIR`: Log directory (default `logs`)
//! - `MARKET_LOG_JSON`: JSON lines in the file log (1=on, 0=off)
//! - `MARKET_LOG_STDOUT`: Mirror logs to stdout (1=on, 0=off)

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init as init_logger;

use tracing_appender::non_blocking::WorkerGuard;

use crate::core::error::Result;

/// Initialize logging from the environment.
pub fn init() -> Result<WorkerGuard> {
    init_logger(&LogConfig::from_env())
}
