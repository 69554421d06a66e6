//! # Deferred Action Executor
//!
//! Runs actions immediately for signed-in users and parks them behind the sign-in
//! prompt otherwise. Holds a single pending slot per executor.
//!
//! With a [`ServiceGate`] attached, every action passes the gate twice: when it is
//! handed in, and again right before a deferred action is replayed after sign-in.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use lib_utils::time::{format_time, is_older_than, now_utc};
use parking_lot::Mutex;
use uuid::Uuid;

use super::{Action, Execution};
use crate::core::config::ClientConfig;
use crate::core::error::Result;
use crate::core::service::SessionProvider;
use crate::gate::ServiceGate;

/// Label used for gate checks when the caller does not name the action
pub const DEFAULT_ACTION_LABEL: &str = "action";

/// Executor behaviour knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Defer actions while nobody is signed in
    pub require_auth: bool,
    /// Wait before replaying the pending action after sign-in
    pub retry_delay: Duration,
    /// Drop pending actions older than this at sign-in. `None` keeps them forever.
    pub pending_ttl: Option<Duration>,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            require_auth: true,
            retry_delay: Duration::ZERO,
            pending_ttl: None,
        }
    }
}

impl ExecutorOptions {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            require_auth: config.require_auth,
            retry_delay: config.auth_retry_delay,
            pending_ttl: config.pending_ttl,
        }
    }
}

struct PendingAction {
    id: Uuid,
    label: String,
    action: Action,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct ExecutorState {
    pending: Option<PendingAction>,
    prompt_visible: bool,
}

type SuccessCallback = Arc<dyn Fn() + Send + Sync>;

/// Deferred action executor
pub struct ActionExecutor {
    session: Arc<dyn SessionProvider>,
    options: ExecutorOptions,
    on_success: Option<SuccessCallback>,
    gate: Option<Arc<ServiceGate>>,
    state: Mutex<ExecutorState>,
}

impl ActionExecutor {
    pub fn new(session: Arc<dyn SessionProvider>, options: ExecutorOptions) -> Self {
        Self {
            session,
            options,
            on_success: None,
            gate: None,
            state: Mutex::new(ExecutorState::default()),
        }
    }

    /// Callback fired after every action that runs to completion, and after a sign-in
    /// that had nothing to replay.
    pub fn with_on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(callback));
        self
    }

    /// Admit actions through `gate`, at submission and again at replay.
    pub fn with_gate(mut self, gate: Arc<ServiceGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn options(&self) -> ExecutorOptions {
        self.options
    }

    /// Run `action` now, or park it behind the sign-in prompt.
    ///
    /// Parking replaces any action already pending.
    pub async fn execute_action(&self, action: Action) -> Result<Execution> {
        self.execute_labeled(DEFAULT_ACTION_LABEL, action).await
    }

    /// [`execute_action`](Self::execute_action) with a label for gate checks and logs.
    pub async fn execute_labeled(&self, label: &str, action: Action) -> Result<Execution> {
        if !self.admits(label) {
            return Ok(Execution::Denied);
        }
        if self.options.require_auth && !self.session.session().is_authenticated() {
            self.defer(label, action);
            return Ok(Execution::Deferred);
        }
        self.run(action).await?;
        Ok(Execution::Completed)
    }

    /// Sign-in succeeded: hide the prompt and replay the pending action once.
    pub async fn handle_auth_success(&self) -> Result<Execution> {
        let pending = {
            let mut state = self.state.lock();
            state.prompt_visible = false;
            state.pending.take()
        };

        let Some(pending) = pending else {
            tracing::debug!("Sign-in completed with no pending action");
            self.fire_on_success();
            return Ok(Execution::NothingPending);
        };

        if let Some(ttl) = self.options.pending_ttl {
            if is_older_than(pending.created_at, ttl) {
                tracing::info!(
                    pending_id = %pending.id,
                    created_at = %format_time(pending.created_at),
                    "Dropping expired pending action"
                );
                self.fire_on_success();
                return Ok(Execution::Expired);
            }
        }

        if !self.options.retry_delay.is_zero() {
            tokio::time::sleep(self.options.retry_delay).await;
        }

        // The gate may have closed while the action was parked
        if !self.admits(&pending.label) {
            tracing::info!(pending_id = %pending.id, label = %pending.label, "Deferred action denied at replay");
            return Ok(Execution::Denied);
        }

        tracing::info!(pending_id = %pending.id, label = %pending.label, "Resuming deferred action after sign-in");
        self.run(pending.action).await?;
        Ok(Execution::Completed)
    }

    /// Sign-in failed or was cancelled. The prompt stays open; nothing is retried.
    pub fn handle_auth_cancelled(&self) {
        tracing::debug!(
            prompt_visible = self.auth_prompt_visible(),
            "Sign-in did not complete"
        );
    }

    /// The user closed the sign-in prompt. The pending action stays parked.
    pub fn close_auth_prompt(&self) {
        self.state.lock().prompt_visible = false;
    }

    /// Drop the pending action, if any.
    pub fn cancel_pending(&self) -> bool {
        let mut state = self.state.lock();
        state.prompt_visible = false;
        match state.pending.take() {
            Some(pending) => {
                tracing::debug!(pending_id = %pending.id, "Pending action cancelled");
                true
            }
            None => false,
        }
    }

    pub fn auth_prompt_visible(&self) -> bool {
        self.state.lock().prompt_visible
    }

    pub fn has_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    pub fn pending_created_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().pending.as_ref().map(|p| p.created_at)
    }

    fn admits(&self, label: &str) -> bool {
        self.gate.as_ref().map_or(true, |gate| gate.check_access(label))
    }

    fn defer(&self, label: &str, action: Action) {
        let pending = PendingAction {
            id: Uuid::new_v4(),
            label: label.to_string(),
            action,
            created_at: now_utc(),
        };
        let pending_id = pending.id;

        let mut state = self.state.lock();
        if let Some(previous) = state.pending.replace(pending) {
            tracing::debug!(replaced = %previous.id, pending_id = %pending_id, "Pending action replaced");
        }
        state.prompt_visible = true;
        drop(state);

        tracing::info!(pending_id = %pending_id, label, "Action deferred until sign-in");
    }

    async fn run(&self, action: Action) -> Result<()> {
        action.run().await?;
        self.fire_on_success();
        Ok(())
    }

    fn fire_on_success(&self) {
        if let Some(callback) = &self.on_success {
            callback();
        }
    }
}

impl std::fmt::Debug for ActionExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ActionExecutor")
            .field("options", &self.options)
            .field("pending", &state.pending.as_ref().map(|p| p.id))
            .field("prompt_visible", &state.prompt_visible)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ClientError;
    use crate::services::notifications::ChannelNotifier;
    use crate::test_support::{TestSession, TestSettings};
    use futures::FutureExt;
    use shared::{ServiceFlags, Session};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    fn counting_action(calls: &Arc<AtomicUsize>) -> Action {
        let calls = calls.clone();
        Action::sync(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn test_no_auth_required_runs_synchronously_once() {
        let session = TestSession::new(Session::anonymous());
        let options = ExecutorOptions {
            require_auth: false,
            ..ExecutorOptions::default()
        };
        let successes = counter();
        let s = successes.clone();
        let executor = ActionExecutor::new(session, options).with_on_success(move || {
            s.fetch_add(1, Ordering::SeqCst);
        });

        let calls = counter();
        // Completes on first poll: no runtime, no suspension
        let result = executor.execute_action(counting_action(&calls)).now_or_never();

        assert!(matches!(result, Some(Ok(Execution::Completed))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(successes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_signed_in_awaits_then_fires_on_success() {
        let session = TestSession::new(Session::signed_in("u1"));
        let order = Arc::new(Mutex::new(Vec::new()));
        let o = order.clone();
        let executor = ActionExecutor::new(session, ExecutorOptions::default())
            .with_on_success(move || o.lock().push("on_success"));

        let o = order.clone();
        let result = executor
            .execute_action(Action::future(move || async move {
                tokio::task::yield_now().await;
                o.lock().push("action");
                Ok(())
            }))
            .await
            .unwrap();

        assert_eq!(result, Execution::Completed);
        assert_eq!(*order.lock(), vec!["action", "on_success"]);
    }

    #[tokio::test]
    async fn test_failed_action_skips_on_success() {
        let session = TestSession::new(Session::signed_in("u1"));
        let successes = counter();
        let s = successes.clone();
        let executor = ActionExecutor::new(session, ExecutorOptions::default()).with_on_success(move || {
            s.fetch_add(1, Ordering::SeqCst);
        });

        let result = executor
            .execute_action(Action::future(|| async { Err(ClientError::Action("mint failed".into())) }))
            .await;

        assert!(matches!(result, Err(ClientError::Action(_))));
        assert_eq!(successes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_anonymous_defers_until_auth_success() {
        let session = TestSession::new(Session::anonymous());
        let executor = ActionExecutor::new(session.clone(), ExecutorOptions::default());
        let calls = counter();

        let result = executor.execute_action(counting_action(&calls)).await.unwrap();
        assert_eq!(result, Execution::Deferred);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(executor.auth_prompt_visible());
        assert!(executor.has_pending());
        assert!(executor.pending_created_at().is_some());

        executor.handle_auth_cancelled();
        assert!(executor.auth_prompt_visible());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        session.set(Session::signed_in("u1"));
        assert_eq!(executor.handle_auth_success().await.unwrap(), Execution::Completed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!executor.auth_prompt_visible());

        // Replayed at most once
        assert_eq!(executor.handle_auth_success().await.unwrap(), Execution::NothingPending);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_loading_session_defers() {
        let session = TestSession::new(Session::loading());
        let executor = ActionExecutor::new(session, ExecutorOptions::default());
        let calls = counter();

        assert_eq!(
            executor.execute_action(counting_action(&calls)).await.unwrap(),
            Execution::Deferred
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_last_deferred_action_wins() {
        let session = TestSession::new(Session::anonymous());
        let executor = ActionExecutor::new(session, ExecutorOptions::default());
        let first = counter();
        let second = counter();

        executor.execute_action(counting_action(&first)).await.unwrap();
        executor.execute_action(counting_action(&second)).await.unwrap();
        executor.handle_auth_success().await.unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_closing_prompt_keeps_pending() {
        let session = TestSession::new(Session::anonymous());
        let executor = ActionExecutor::new(session, ExecutorOptions::default());
        let calls = counter();

        executor.execute_action(counting_action(&calls)).await.unwrap();
        executor.close_auth_prompt();
        assert!(!executor.auth_prompt_visible());
        assert!(executor.has_pending());

        assert!(executor.cancel_pending());
        assert!(!executor.cancel_pending());
        assert_eq!(executor.handle_auth_success().await.unwrap(), Execution::NothingPending);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_expired_pending_action_is_dropped() {
        let session = TestSession::new(Session::anonymous());
        let options = ExecutorOptions {
            pending_ttl: Some(Duration::ZERO),
            ..ExecutorOptions::default()
        };
        let executor = ActionExecutor::new(session, options);
        let calls = counter();

        executor.execute_action(counting_action(&calls)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert_eq!(executor.handle_auth_success().await.unwrap(), Execution::Expired);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!executor.has_pending());
    }

    #[tokio::test]
    async fn test_auth_success_without_pending_fires_on_success() {
        let session = TestSession::new(Session::signed_in("u1"));
        let successes = counter();
        let s = successes.clone();
        let executor = ActionExecutor::new(session, ExecutorOptions::default()).with_on_success(move || {
            s.fetch_add(1, Ordering::SeqCst);
        });

        executor.handle_auth_success().await.unwrap();
        assert_eq!(successes.load(Ordering::SeqCst), 1);
    }

    fn gated_executor(session: Arc<TestSession>, flags: ServiceFlags) -> (ActionExecutor, Arc<ServiceGate>) {
        let (notifier, _rx) = ChannelNotifier::new();
        let gate = Arc::new(ServiceGate::new(flags, session.clone(), Arc::new(notifier)));
        let executor = ActionExecutor::new(session, ExecutorOptions::default()).with_gate(gate.clone());
        (executor, gate)
    }

    #[tokio::test]
    async fn test_gate_denies_at_submission() {
        let session = TestSession::new(Session::signed_in("u1"));
        let (executor, _gate) = gated_executor(session, ServiceFlags::paused(None));
        let calls = counter();

        let result = executor.execute_labeled("mint", counting_action(&calls)).await.unwrap();

        assert_eq!(result, Execution::Denied);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!executor.has_pending());
        assert!(!executor.auth_prompt_visible());
    }

    #[tokio::test]
    async fn test_pause_while_parked_denies_replay() {
        let session = TestSession::new(Session::anonymous());
        let (executor, gate) = gated_executor(session.clone(), ServiceFlags::default());
        let successes = counter();
        let s = successes.clone();
        let executor = executor.with_on_success(move || {
            s.fetch_add(1, Ordering::SeqCst);
        });
        let calls = counter();

        assert_eq!(
            executor.execute_labeled("mint", counting_action(&calls)).await.unwrap(),
            Execution::Deferred
        );

        gate.refresh(&TestSettings(Ok(ServiceFlags::paused(None)))).await.unwrap();
        session.set(Session::signed_in("u1"));

        assert_eq!(executor.handle_auth_success().await.unwrap(), Execution::Denied);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(successes.load(Ordering::SeqCst), 0);
        assert!(!executor.has_pending());
    }
}
