//! # Marketplace Client Core - Library Root
//!
//! The client-side orchestration layer of an NFT marketplace. Nearly all business logic
//! lives on the backend; this crate owns the parts with state-machine character:
//!
//! - **Auth-gated actions**: an anonymous user's intended action (like, follow, mint,
//!   set-primary-wallet) is captured, deferred behind a sign-in prompt and replayed once
//!   sign-in succeeds.
//! - **Service gate**: a circuit breaker that pauses all actions, or restricts them to
//!   signed-in users, based on remote operational flags.
//! - **Primary wallet flow**: prompts a signed-in user whose connected wallet could be
//!   their primary wallet, then signs and links it.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              marketplace (this crate)                  │
//! ├────────────────────────────────────────────────────────┤
//! │  app             - Orchestrator (App, AppBuilder)      │
//! │  gate            - Service gate / circuit breaker      │
//! │  actions         - Deferred executor, click capture    │
//! │  primary_wallet  - Prompt state machine + link flow    │
//! │  storage         - Client key/value storage            │
//! │  services        - HTTP client, notifications          │
//! │  core            - Config, errors, collaborator traits │
//! │  debug           - File logging                        │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTP                         │ WalletAdapter
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Backend API    │          │   Browser/native wallet │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Collaborators
//!
//! Authentication, the wallet and the backend are reached through the traits in
//! [`core::service`], so every component can be driven by test doubles. The stock
//! implementations are [`services::api::ApiClient`] (reqwest) and the storages in
//! [`storage`].
//!
//! ## Shared Crate
//!
//! - `shared` - Wire DTOs (`Session`, `ServiceFlags`, `LinkWalletRequest`, ...) and the
//!   wallet linking message
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p marketplace
//! cargo test -p marketplace -- --ignored   # needs a running backend
//! ```

pub mod actions;
pub mod app;
pub mod core;
pub mod debug;
pub mod gate;
pub mod primary_wallet;
pub mod services;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use actions::{Action, ActionExecutor, ClickCapture, ClickEvent, Execution, ExecutorOptions};
pub use app::{App, AppBuilder};
pub use crate::core::{ClientConfig, ClientError, Result};
pub use gate::{AccessDenial, ServiceGate};
pub use primary_wallet::{LinkOutcome, PrimaryWalletFlow, PromptState};
