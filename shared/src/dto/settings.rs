//! # Service Settings DTOs
//!
//! Remote operational flags read by the client's circuit breaker.

use serde::{Deserialize, Serialize};

/// Operational flags published by the settings backend.
///
/// `Default` is the permissive object: not paused, open to everyone. The client
/// substitutes it when the settings fetch fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceFlags {
    pub is_paused: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause_message: Option<String>,
    pub allowlist_only: bool,
}

impl ServiceFlags {
    pub fn paused(message: Option<String>) -> Self {
        Self {
            is_paused: true,
            pause_message: message,
            allowlist_only: false,
        }
    }

    pub fn allowlist_only() -> Self {
        Self {
            allowlist_only: true,
            ..Self::default()
        }
    }
}
