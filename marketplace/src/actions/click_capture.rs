//! # Click-Capture Wrapper
//!
//! Intercepts a click on an interactive element (link, card, button) before it
//! navigates or bubbles, then hands the intended action to an [`ActionExecutor`].

use std::sync::Arc;

use super::executor::{ActionExecutor, ExecutorOptions, DEFAULT_ACTION_LABEL};
use super::{Action, Execution};
use crate::core::config::CLICK_RETRY_DELAY;
use crate::core::error::Result;
use crate::core::service::SessionProvider;

/// The parts of a UI event the wrapper needs to suppress.
pub trait CapturedEvent {
    fn prevent_default(&mut self);
    fn stop_propagation(&mut self);
}

/// Plain click event recording what was suppressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickEvent {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl CapturedEvent for ClickEvent {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Click interceptor over a deferred action executor
#[derive(Debug, Clone)]
pub struct ClickCapture {
    executor: Arc<ActionExecutor>,
}

impl ClickCapture {
    /// Require sign-in and replay after [`CLICK_RETRY_DELAY`].
    pub fn new(session: Arc<dyn SessionProvider>) -> Self {
        let options = ExecutorOptions {
            require_auth: true,
            retry_delay: CLICK_RETRY_DELAY,
            pending_ttl: None,
        };
        Self::wrap(Arc::new(ActionExecutor::new(session, options)))
    }

    pub fn wrap(executor: Arc<ActionExecutor>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &Arc<ActionExecutor> {
        &self.executor
    }

    /// Suppress the event's default behaviour and propagation, then run or defer `action`.
    pub async fn on_click<E>(&self, event: &mut E, action: Action) -> Result<Execution>
    where
        E: CapturedEvent + ?Sized,
    {
        self.on_labeled_click(DEFAULT_ACTION_LABEL, event, action).await
    }

    /// [`on_click`](Self::on_click) with a label for the executor's gate check.
    ///
    /// The event is suppressed even when the gate denies the action.
    pub async fn on_labeled_click<E>(&self, label: &str, event: &mut E, action: Action) -> Result<Execution>
    where
        E: CapturedEvent + ?Sized,
    {
        event.prevent_default();
        event.stop_propagation();
        self.executor.execute_labeled(label, action).await
    }

    /// Replay the captured action once, after the retry delay.
    pub async fn handle_auth_success(&self) -> Result<Execution> {
        self.executor.handle_auth_success().await
    }

    pub fn auth_prompt_visible(&self) -> bool {
        self.executor.auth_prompt_visible()
    }
}
