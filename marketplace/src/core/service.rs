//! # Collaborator Traits
//!
//! The client core owns no session, wallet, settings or persistence of its own. Each of
//! those is an external collaborator reached through one of these traits, so that
//! production wiring (browser wallet, auth provider, HTTP backend) and test doubles are
//! interchangeable behind `Arc<dyn _>`.

use async_trait::async_trait;
use shared::{build_linking_message, LinkWalletRequest, ServiceFlags, Session, WalletConnection};

use crate::core::error::{ServiceError, WalletError};
use crate::services::notifications::Notification;

/// Current authenticated-user state. Lifecycle is owned by the auth provider.
pub trait SessionProvider: Send + Sync {
    fn session(&self) -> Session;
}

/// Wallet adapter: connection state plus a message-signing capability.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn connection(&self) -> WalletConnection;

    /// Request a signature over `message`.
    ///
    /// Returns `Ok(None)` when the user declines the request.
    async fn sign_message(&self, message: &[u8]) -> Result<Option<Vec<u8>>, WalletError>;
}

/// Source of the remote operational flags.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn fetch_service_flags(&self) -> Result<ServiceFlags, ServiceError>;
}

/// Backend operations behind the primary-wallet flow.
#[async_trait]
pub trait WalletLinkService: Send + Sync {
    /// Whether the account already has a designated primary wallet
    async fn has_primary_wallet(&self, user_id: &str) -> Result<bool, ServiceError>;

    /// Challenge text signed by the wallet. Must be deterministic for a given address.
    fn build_linking_message(&self, address: &str) -> String {
        build_linking_message(address)
    }

    /// Submit a signed link request. `Ok(false)` means the backend refused it.
    async fn link_wallet(&self, request: &LinkWalletRequest) -> Result<bool, ServiceError>;
}

/// User-facing notification surface (toasts).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
