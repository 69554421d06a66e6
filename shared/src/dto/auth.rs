use serde::{Deserialize, Serialize};

/// Authenticated-user state as exposed by the auth provider.
///
/// `is_loading` is true until the provider has resolved the current user once.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_loading: bool,
}

impl Session {
    /// Session still being resolved by the auth provider
    pub fn loading() -> Self {
        Self {
            user_id: None,
            is_loading: true,
        }
    }

    /// Resolved session without a signed-in user
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Resolved session for a signed-in user
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            is_loading: false,
        }
    }

    /// A loading session never counts as authenticated.
    pub fn is_authenticated(&self) -> bool {
        !self.is_loading && self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        if self.is_loading {
            return None;
        }
        self.user_id.as_deref()
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
