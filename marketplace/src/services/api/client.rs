//! # API Client
//!
//! Main HTTP client for backend API communication.

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{ErrorResponse, LinkWalletRequest, ServiceFlags};

use crate::core::config::ClientConfig;
use crate::core::error::ServiceError;
use crate::core::service::{SettingsSource, WalletLinkService};

/// HTTP client for communicating with the backend API server.
///
/// Holds a pooled `reqwest::Client`; cheap to share behind `Arc`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `config.api_base_url` with the configured request timeout.
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build HTTP client, using defaults");
                Client::new()
            });

        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Convert a non-success response into a `ServiceError::Status`, using the backend's
/// `ErrorResponse` text when the body carries one.
pub(crate) async fn status_error(response: Response) -> ServiceError {
    let status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    ServiceError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl SettingsSource for ApiClient {
    async fn fetch_service_flags(&self) -> Result<ServiceFlags, ServiceError> {
        crate::services::api::settings::get_service_flags(self).await
    }
}

#[async_trait]
impl WalletLinkService for ApiClient {
    async fn has_primary_wallet(&self, user_id: &str) -> Result<bool, ServiceError> {
        crate::services::api::wallet::has_primary_wallet(self, user_id).await
    }

    async fn link_wallet(&self, request: &LinkWalletRequest) -> Result<bool, ServiceError> {
        crate::services::api::wallet::link_wallet(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig {
            api_base_url: "https://api.example.com/".to_string(),
            ..ClientConfig::default()
        };
        let client = ApiClient::new(&config);
        assert_eq!(client.base_url(), "https://api.example.com");
        assert_eq!(
            client.url("/api/wallets/link"),
            "https://api.example.com/api/wallets/link"
        );
    }

    #[test]
    fn test_default_linking_message_comes_from_shared() {
        let client = ApiClient::new(&ClientConfig::default());
        assert_eq!(
            client.build_linking_message("abc"),
            shared::build_linking_message("abc")
        );
    }
}
