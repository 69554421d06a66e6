//! # Wallet Endpoints
//!
//! Primary-wallet lookup and wallet linking.

use shared::{LinkWalletRequest, LinkWalletResponse, PrimaryWalletResponse};

use super::client::{status_error, ApiClient};
use crate::core::error::ServiceError;

/// Whether the account already has a primary wallet.
#[tracing::instrument(skip(client))]
pub async fn has_primary_wallet(client: &ApiClient, user_id: &str) -> Result<bool, ServiceError> {
    let response = client
        .client
        .get(client.url("/api/wallets/primary"))
        .query(&[("user_id", user_id)])
        .send()
        .await
        .map_err(|e| ServiceError::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(status_error(response).await);
    }

    response
        .json::<PrimaryWalletResponse>()
        .await
        .map(|body| body.has_primary_wallet)
        .map_err(|e| ServiceError::Parse(e.to_string()))
}

/// Submit a signed wallet link request.
///
/// A 4xx rejection (bad signature, wallet already linked elsewhere) is reported as
/// `Ok(false)`; server and transport failures are errors.
#[tracing::instrument(skip(client, request), fields(wallet = %shared::truncate_address(&request.wallet_address), role = request.role.as_str()))]
pub async fn link_wallet(client: &ApiClient, request: &LinkWalletRequest) -> Result<bool, ServiceError> {
    let start = std::time::Instant::now();

    let response = client
        .client
        .post(client.url("/api/wallets/link"))
        .json(request)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Wallet link network error");
            ServiceError::Network(e.to_string())
        })?;

    let status = response.status();
    if status.is_client_error() {
        let error = status_error(response).await;
        tracing::warn!(error = %error, "Wallet link rejected");
        return Ok(false);
    }
    if !status.is_success() {
        return Err(status_error(response).await);
    }

    let body = response
        .json::<LinkWalletResponse>()
        .await
        .map_err(|e| ServiceError::Parse(e.to_string()))?;

    tracing::info!(
        success = body.success,
        duration_ms = start.elapsed().as_millis() as u64,
        "Wallet link completed"
    );
    Ok(body.success)
}
