//! # Common Error Types
//!
//! Consolidated error handling for the marketplace client core.
//!
//! ## Error Categories
//!
//! Errors are categorized by their source:
//!
//! - **Service**: Remote backend failures (network, HTTP status, JSON parsing)
//! - **Wallet**: Wallet adapter failures while signing
//! - **Storage**: Client storage read/write failures
//! - **Action**: A caller-supplied action failed
//! - **Config**: Invalid configuration values
//!
//! Access denials from the service gate and user cancellations are **not** errors:
//! they are reported through [`crate::gate::AccessDenial`] and
//! [`crate::primary_wallet::LinkOutcome`] and surfaced as notifications.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use marketplace::core::error::{ClientError, Result};
//!
//! fn like(item_id: &str) -> Result<()> {
//!     if item_id.is_empty() {
//!         return Err(ClientError::Action("Missing item id".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(like("").is_err());
//! ```

use thiserror::Error;

/// Remote backend failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Connection refused, timeout, DNS failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status, with the backend's error text when available
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Malformed response body
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Wallet adapter failure while signing.
///
/// A user declining the signature request is not a `WalletError`; the adapter
/// reports it as `Ok(None)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Wallet not connected")]
    NotConnected,

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Wallet does not support message signing")]
    Unsupported,
}

/// Client storage failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt storage file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A caller-supplied action failed.
    #[error("Action failed: {0}")]
    Action(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<String> for ClientError {
    fn from(msg: String) -> Self {
        ClientError::Action(msg)
    }
}

impl From<&str> for ClientError {
    fn from(msg: &str) -> Self {
        ClientError::Action(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::from(ServiceError::Status {
            status: 503,
            message: "maintenance".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Service error: Request failed with status 503: maintenance"
        );

        let err = ClientError::from(WalletError::NotConnected);
        assert_eq!(err.to_string(), "Wallet error: Wallet not connected");
    }

    #[test]
    fn test_string_converts_to_action_error() {
        let err: ClientError = "mint failed".into();
        assert!(matches!(err, ClientError::Action(ref msg) if msg == "mint failed"));
    }
}
