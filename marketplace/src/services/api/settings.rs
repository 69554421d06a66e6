//! # Settings Endpoints
//!
//! Fetches the operational flags read by the service gate.

use shared::ServiceFlags;

use super::client::{status_error, ApiClient};
use crate::core::error::ServiceError;

/// Fetch the current service flags.
#[tracing::instrument(skip(client))]
pub async fn get_service_flags(client: &ApiClient) -> Result<ServiceFlags, ServiceError> {
    let response = client
        .client
        .get(client.url("/api/settings/service-flags"))
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Service flags network error");
            ServiceError::Network(e.to_string())
        })?;

    if !response.status().is_success() {
        return Err(status_error(response).await);
    }

    let flags = response
        .json::<ServiceFlags>()
        .await
        .map_err(|e| ServiceError::Parse(e.to_string()))?;

    tracing::debug!(
        is_paused = flags.is_paused,
        allowlist_only = flags.allowlist_only,
        "Service flags fetched"
    );
    Ok(flags)
}
