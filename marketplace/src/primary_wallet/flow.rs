//! # Primary Wallet Flow
//!
//! Drives [`PromptState`] from wallet/session changes and user decisions, and performs
//! the sign-and-link round trip.

use std::sync::Arc;

use parking_lot::Mutex;
use shared::{truncate_address, LinkWalletRequest, WalletRole};

use super::state::{PromptEvent, PromptState};
use super::LinkOutcome;
use crate::core::service::{Notifier, SessionProvider, WalletAdapter, WalletLinkService};
use crate::services::notifications::Notification;
use crate::storage::DismissalStore;

pub const SIGNING_CANCELLED_MESSAGE: &str = "Signature request cancelled. Your wallet was not linked.";
pub const SIGNING_FAILED_MESSAGE: &str = "Could not sign the wallet link message.";
pub const LINK_FAILED_MESSAGE: &str = "Failed to set primary wallet. Please try again.";

#[derive(Debug, Default)]
struct FlowState {
    prompt: PromptState,
    /// A link request is outstanding
    submitting: bool,
    /// Bumped by every link or dismissal; evaluations started earlier are stale
    generation: u64,
}

/// Auto-primary-wallet workflow
pub struct PrimaryWalletFlow {
    session: Arc<dyn SessionProvider>,
    wallet: Arc<dyn WalletAdapter>,
    links: Arc<dyn WalletLinkService>,
    dismissals: DismissalStore,
    notifier: Arc<dyn Notifier>,
    state: Mutex<FlowState>,
}

/// Clears the submitting flag when the accept handler finishes or is dropped.
struct SubmitGuard<'a>(&'a Mutex<FlowState>);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.lock().submitting = false;
    }
}

impl PrimaryWalletFlow {
    pub fn new(
        session: Arc<dyn SessionProvider>,
        wallet: Arc<dyn WalletAdapter>,
        links: Arc<dyn WalletLinkService>,
        dismissals: DismissalStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            wallet,
            links,
            dismissals,
            notifier,
            state: Mutex::new(FlowState::default()),
        }
    }

    pub fn state(&self) -> PromptState {
        self.state.lock().prompt.clone()
    }

    pub fn prompt_visible(&self) -> bool {
        self.state.lock().prompt.is_visible()
    }

    pub fn candidate_address(&self) -> Option<String> {
        self.state.lock().prompt.candidate_address().map(str::to_owned)
    }

    pub fn is_submitting(&self) -> bool {
        self.state.lock().submitting
    }

    /// Re-evaluate eligibility. Call on every change of the wallet's
    /// `(connected, address)` pair and on sign-in/out.
    pub async fn on_connection_change(&self) -> PromptState {
        let address = self.wallet.connection().connected_address().map(str::to_owned);
        let user_id = self.session.session().user_id().map(str::to_owned);

        let (Some(address), Some(user_id)) = (address, user_id) else {
            return self.apply(PromptEvent::Disconnected);
        };
        let generation = self.state.lock().generation;

        let has_primary = match self.links.has_primary_wallet(&user_id).await {
            Ok(has_primary) => has_primary,
            Err(e) => {
                tracing::warn!(error = %e, user_id = %user_id, "Primary wallet lookup failed");
                return self.apply_if_current(&address, generation, PromptEvent::Evaluated {
                    address: address.clone(),
                    eligible: false,
                });
            }
        };

        let dismissed = match self.dismissals.is_dismissed(&address) {
            Ok(dismissed) => dismissed,
            Err(e) => {
                tracing::warn!(error = %e, address = %truncate_address(&address), "Dismissal record unreadable");
                false
            }
        };

        let eligible = !has_primary && !dismissed;
        tracing::debug!(
            address = %truncate_address(&address),
            has_primary,
            dismissed,
            eligible,
            "Primary wallet eligibility evaluated"
        );

        self.apply_if_current(&address, generation, PromptEvent::Evaluated {
            address: address.clone(),
            eligible,
        })
    }

    /// Accept the prompt: sign the linking message and link the wallet as primary.
    pub async fn handle_set_as_primary(&self) -> LinkOutcome {
        let Some(address) = self.wallet.connection().connected_address().map(str::to_owned) else {
            tracing::debug!("Set-as-primary requested without a connected wallet");
            return LinkOutcome::NoWallet;
        };

        {
            let mut state = self.state.lock();
            if state.prompt.candidate_address() != Some(address.as_str()) {
                tracing::debug!(address = %truncate_address(&address), "Set-as-primary requested while not prompted");
                return LinkOutcome::NotPrompted;
            }
            if state.submitting {
                tracing::debug!(address = %truncate_address(&address), "Link already in flight");
                return LinkOutcome::InFlight;
            }
            state.submitting = true;
        }
        let _guard = SubmitGuard(&self.state);

        self.sign_and_link(address).await
    }

    /// Dismiss the prompt for the current wallet, permanently.
    pub fn handle_dismiss(&self) {
        let address = self
            .wallet
            .connection()
            .connected_address()
            .map(str::to_owned)
            .or_else(|| self.candidate_address());

        let Some(address) = address else {
            return;
        };

        if let Err(e) = self.dismissals.dismiss(&address) {
            tracing::error!(error = %e, address = %truncate_address(&address), "Failed to persist dismissal");
        }
        tracing::info!(address = %truncate_address(&address), "Primary wallet prompt dismissed");
        self.apply(PromptEvent::Dismissed { address });
    }

    async fn sign_and_link(&self, address: String) -> LinkOutcome {
        let message = self.links.build_linking_message(&address);

        let signature = match self.wallet.sign_message(message.as_bytes()).await {
            Ok(Some(signature)) => signature,
            Ok(None) => {
                tracing::info!(address = %truncate_address(&address), "Signature request cancelled");
                self.notifier.notify(Notification::warning(SIGNING_CANCELLED_MESSAGE));
                return LinkOutcome::Cancelled;
            }
            Err(e) => {
                tracing::warn!(error = %e, address = %truncate_address(&address), "Signature request failed");
                self.notifier.notify(Notification::error(SIGNING_FAILED_MESSAGE));
                return LinkOutcome::SigningFailed;
            }
        };

        let request = LinkWalletRequest {
            wallet_address: address.clone(),
            signature: bs58::encode(signature).into_string(),
            message,
            role: WalletRole::Primary,
        };

        match self.links.link_wallet(&request).await {
            Ok(true) => {
                tracing::info!(address = %truncate_address(&address), "Primary wallet linked");
                self.notifier.notify(Notification::success(format!(
                    "{} is now your primary wallet.",
                    truncate_address(&address)
                )));
                self.apply(PromptEvent::Linked { address });
                LinkOutcome::Linked
            }
            Ok(false) => {
                tracing::warn!(address = %truncate_address(&address), "Primary wallet link rejected");
                self.notifier.notify(Notification::error(LINK_FAILED_MESSAGE));
                LinkOutcome::LinkFailed
            }
            Err(e) => {
                tracing::error!(error = %e, address = %truncate_address(&address), "Primary wallet link failed");
                self.notifier.notify(Notification::error(LINK_FAILED_MESSAGE));
                LinkOutcome::LinkFailed
            }
        }
    }

    fn apply(&self, event: PromptEvent) -> PromptState {
        let mut state = self.state.lock();
        if matches!(event, PromptEvent::Linked { .. } | PromptEvent::Dismissed { .. }) {
            state.generation += 1;
        }
        let next = std::mem::take(&mut state.prompt).transition(event);
        state.prompt = next.clone();
        next
    }

    /// Apply an evaluation only if `address` is still the connected wallet and no link
    /// or dismissal landed since `generation` was read. Anything else is a stale result.
    fn apply_if_current(&self, address: &str, generation: u64, event: PromptEvent) -> PromptState {
        let current = self.wallet.connection();
        if current.connected_address() != Some(address) {
            tracing::debug!(address = %truncate_address(address), "Discarding eligibility result for a swapped wallet");
            return self.state();
        }

        let mut state = self.state.lock();
        if state.generation != generation {
            tracing::debug!(address = %truncate_address(address), "Discarding eligibility result overtaken by a link or dismissal");
            return state.prompt.clone();
        }
        let next = std::mem::take(&mut state.prompt).transition(event);
        state.prompt = next.clone();
        next
    }
}

impl std::fmt::Debug for PrimaryWalletFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimaryWalletFlow")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}
