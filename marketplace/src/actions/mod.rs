//! # Auth-Gated Actions
//!
//! Capture a user's intended action (like, follow, mint, set-primary-wallet), defer it
//! behind a sign-in prompt when nobody is signed in, and resume it once sign-in succeeds.
//!
//! ## Lifecycle
//!
//! ```text
//!  execute_action(action)
//!        │
//!        ├── signed in (or auth not required) ──> run now ──> on_success
//!        │
//!        └── anonymous ──> PendingAction slot (last write wins)
//!                          auth prompt visible
//!                                │
//!             handle_auth_success()
//!                                │
//!                                └──> prompt hidden ──> wait retry_delay
//!                                     ──> run pending once ──> on_success
//! ```
//!
//! Both [`ActionExecutor`] and [`ClickCapture`] follow the same contract: after a
//! successful sign-in the pending action is replayed exactly once. `ClickCapture` also
//! suppresses the default behaviour and propagation of the click that triggered it, and
//! waits [`crate::core::config::CLICK_RETRY_DELAY`] before the replay so the auth UI can
//! close first.

pub mod click_capture;
pub mod executor;

use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::core::error::Result;

pub use click_capture::{CapturedEvent, ClickCapture, ClickEvent};
pub use executor::{ActionExecutor, ExecutorOptions};

/// A caller-supplied unit of work, synchronous or awaitable.
pub enum Action {
    Sync(Box<dyn FnOnce() -> Result<()> + Send>),
    Future(Box<dyn FnOnce() -> BoxFuture<'static, Result<()>> + Send>),
}

impl Action {
    /// Action that completes when the closure returns
    pub fn sync<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        Action::Sync(Box::new(f))
    }

    /// Action that completes when the returned future resolves
    pub fn future<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Action::Future(Box::new(move || f().boxed()))
    }

    pub(crate) async fn run(self) -> Result<()> {
        match self {
            Action::Sync(f) => f(),
            Action::Future(f) => f().await,
        }
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Sync(_) => f.write_str("Action::Sync"),
            Action::Future(_) => f.write_str("Action::Future"),
        }
    }
}

/// What happened to an action handed to the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// The action ran to completion and `on_success` fired
    Completed,
    /// Stored as the pending action behind the sign-in prompt
    Deferred,
    /// Sign-in completed with nothing pending
    NothingPending,
    /// Sign-in completed but the pending action had outlived its TTL and was dropped
    Expired,
    /// Refused by the service gate, never invoked
    Denied,
}
