//! # Backend API Client
//!
//! HTTP implementations of [`crate::core::service::SettingsSource`] and
//! [`crate::core::service::WalletLinkService`].
//!
//! ## Endpoints
//!
//! ```text
//! GET  /api/settings/service-flags          -> ServiceFlags
//! GET  /api/wallets/primary?user_id=<id>    -> PrimaryWalletResponse
//! POST /api/wallets/link                    -> LinkWalletResponse
//! ```

pub mod client;
pub mod settings;
pub mod wallet;

pub use client::ApiClient;
