//! # Wallet DTOs
//!
//! Wallet connection state (owned by the browser wallet adapter) and the
//! wallet-linking request/response pair.

use serde::{Deserialize, Serialize};

/// Connection state reported by the wallet adapter.
///
/// `address` is present iff `connected`. Use the constructors to keep that invariant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletConnection {
    pub connected: bool,
    pub connecting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl WalletConnection {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connecting() -> Self {
        Self {
            connected: false,
            connecting: true,
            address: None,
        }
    }

    pub fn connected(address: impl Into<String>) -> Self {
        Self {
            connected: true,
            connecting: false,
            address: Some(address.into()),
        }
    }

    /// Address of a fully connected wallet, `None` otherwise
    pub fn connected_address(&self) -> Option<&str> {
        if self.connected {
            self.address.as_deref()
        } else {
            None
        }
    }
}

/// Role a linked wallet plays for the account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WalletRole {
    Primary,
    Secondary,
}

impl WalletRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletRole::Primary => "primary",
            WalletRole::Secondary => "secondary",
        }
    }
}

/// Link a signed wallet to the authenticated account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkWalletRequest {
    pub wallet_address: String,
    /// Base58-encoded signature over `message`
    pub signature: String,
    pub message: String,
    pub role: WalletRole,
}

/// Wallet link response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkWalletResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Primary wallet lookup response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrimaryWalletResponse {
    pub has_primary_wallet: bool,
}
