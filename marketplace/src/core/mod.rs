//! # Core Abstractions
//!
//! Core traits, error types and configuration shared by every component.
//!
//! ## Modules
//!
//! - **[`error`]**: Error types (`ClientError`, `ServiceError`, `WalletError`, `StorageError`, `Result<T>`)
//! - **[`service`]**: Collaborator traits for dependency injection
//!   (`SessionProvider`, `WalletAdapter`, `SettingsSource`, `WalletLinkService`, `Notifier`)
//! - **[`config`]**: `ClientConfig` loaded from the environment
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use marketplace::core::service::SettingsSource;
//! use marketplace::services::api::ApiClient;
//! use marketplace::core::config::ClientConfig;
//!
//! // In production: the HTTP client
//! let config = ClientConfig::from_env();
//! let settings: Arc<dyn SettingsSource> = Arc::new(ApiClient::new(&config));
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::ClientConfig;
pub use error::{ClientError, Result, ServiceError, StorageError, WalletError};
pub use service::{Notifier, SessionProvider, SettingsSource, WalletAdapter, WalletLinkService};
