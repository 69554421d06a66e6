//! # Prompt State Machine
//!
//! ```text
//!            Evaluated{eligible}            Linked
//!   Idle ─────────────────────────> Prompted ───────> Linked
//!    ^                                  │
//!    │ Disconnected / not eligible      │ Dismissed
//!    └──────────────────────────────────┴───────────> Dismissed
//! ```
//!
//! Eligibility and prompting are one state: the prompt shows as soon as eligibility is
//! confirmed. Visibility is derived from the state, never stored next to it.

/// Primary-wallet prompt state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PromptState {
    /// No connected wallet, no signed-in user, or no evaluation yet
    #[default]
    Idle,
    /// Eligible wallet, prompt visible
    Prompted { address: String },
    /// Wallet linked as primary during this session
    Linked { address: String },
    /// User dismissed the prompt for this wallet
    Dismissed { address: String },
}

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// Wallet disconnected or user signed out
    Disconnected,
    /// Eligibility computed for the connected wallet
    Evaluated { address: String, eligible: bool },
    Linked { address: String },
    Dismissed { address: String },
}

impl PromptState {
    pub fn transition(self, event: PromptEvent) -> PromptState {
        match event {
            PromptEvent::Disconnected => PromptState::Idle,
            PromptEvent::Evaluated {
                address,
                eligible: true,
            } => PromptState::Prompted { address },
            PromptEvent::Evaluated {
                address,
                eligible: false,
            } => {
                // Keep the terminal outcome for the same wallet
                let settled = matches!(
                    &self,
                    PromptState::Linked { address: a } | PromptState::Dismissed { address: a }
                        if *a == address
                );
                if settled {
                    self
                } else {
                    PromptState::Idle
                }
            }
            PromptEvent::Linked { address } => PromptState::Linked { address },
            PromptEvent::Dismissed { address } => PromptState::Dismissed { address },
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, PromptState::Prompted { .. })
    }

    /// Wallet the prompt offers to link, while visible
    pub fn candidate_address(&self) -> Option<&str> {
        match self {
            PromptState::Prompted { address } => Some(address),
            _ => None,
        }
    }
}
