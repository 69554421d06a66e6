//! # Auto-Primary-Wallet Flow
//!
//! Detects a signed-in user whose connected wallet could become their primary wallet,
//! prompts once, and on acceptance runs the sign-and-link round trip.
//!
//! ## Flow
//!
//! ```text
//! wallet (connected, address) changes
//!   └─> signed in? ──no──> Idle
//!        └─> has_primary_wallet(user)? ──yes──> Idle
//!             └─> dismissed-primary-prompt-<address>? ──yes──> Idle
//!                  └─> Prompted
//!                        ├─ accept ─> build_linking_message(address)
//!                        │            └─> wallet.sign_message
//!                        │                 ├─ cancelled/failed ─> notify, stay Prompted
//!                        │                 └─> link_wallet(address, sig, message, primary)
//!                        │                      ├─ true  ─> Linked, notify success
//!                        │                      └─ false ─> notify failure, stay Prompted
//!                        └─ dismiss ─> write dismissal record, Dismissed
//! ```
//!
//! Dismissal records are per address: a different wallet is always evaluated on its own.

pub mod flow;
pub mod state;

pub use flow::PrimaryWalletFlow;
pub use state::{PromptEvent, PromptState};

/// Result of accepting the primary-wallet prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Wallet linked as primary
    Linked,
    /// No connected wallet to link
    NoWallet,
    /// The prompt is not showing for the connected wallet
    NotPrompted,
    /// A link request is already outstanding
    InFlight,
    /// User declined the signature request
    Cancelled,
    /// Wallet failed to produce a signature
    SigningFailed,
    /// Backend refused or failed the link request
    LinkFailed,
}

impl LinkOutcome {
    pub fn is_linked(&self) -> bool {
        matches!(self, LinkOutcome::Linked)
    }
}
