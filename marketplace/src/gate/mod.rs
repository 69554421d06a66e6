//! # Service Gate
//!
//! Global admission check (circuit breaker) driven by remote operational flags,
//! independent of per-user authentication.
//!
//! ## Decision Table
//!
//! ```text
//! is_paused | allowlist_only | signed in | result
//! ----------+----------------+-----------+-------------------------------
//!   true    |       *        |     *     | denied: pause message
//!   false   |     true       |    no     | denied: sign-in required
//!   false   |     true       |    yes    | allowed
//!   false   |     false      |     *     | allowed
//! ```
//!
//! Denials are not errors. The gate notifies the user and the guarded action resolves
//! to `Ok(None)` without running. Errors raised by the action itself are logged and
//! handed back to the caller unchanged.
//!
//! ## Availability
//!
//! Flags are fetched once when the gate is built and cached. If that fetch fails the gate
//! **fails open** to [`ServiceFlags::default`] rather than blocking all traffic.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::RwLock;
use shared::ServiceFlags;

use crate::core::error::ServiceError;
use crate::core::service::{Notifier, SessionProvider, SettingsSource};
use crate::services::notifications::Notification;

/// Shown when the service is paused without a custom message
pub const MAINTENANCE_MESSAGE: &str =
    "The marketplace is temporarily down for maintenance. Please try again later.";

/// Shown when allowlist-only mode blocks an anonymous user
pub const SIGN_IN_REQUIRED_MESSAGE: &str = "Please sign in to continue.";

/// Why the gate refused an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDenial {
    Paused { message: String },
    SignInRequired,
}

impl AccessDenial {
    /// User-facing text for the denial notification
    pub fn message(&self) -> &str {
        match self {
            AccessDenial::Paused { message } => message,
            AccessDenial::SignInRequired => SIGN_IN_REQUIRED_MESSAGE,
        }
    }
}

/// Circuit breaker in front of user actions
pub struct ServiceGate {
    flags: RwLock<ServiceFlags>,
    session: Arc<dyn SessionProvider>,
    notifier: Arc<dyn Notifier>,
}

impl ServiceGate {
    pub fn new(
        flags: ServiceFlags,
        session: Arc<dyn SessionProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            flags: RwLock::new(flags),
            session,
            notifier,
        }
    }

    /// Fetch the flags once and build the gate, failing open on fetch errors.
    pub async fn load(
        source: &dyn SettingsSource,
        session: Arc<dyn SessionProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let flags = match source.fetch_service_flags().await {
            Ok(flags) => flags,
            Err(e) => {
                tracing::warn!(error = %e, "Service flags unavailable, gate fails open");
                ServiceFlags::default()
            }
        };
        Self::new(flags, session, notifier)
    }

    /// Re-fetch the flags. On failure the last cached flags stay in effect.
    pub async fn refresh(&self, source: &dyn SettingsSource) -> Result<(), ServiceError> {
        match source.fetch_service_flags().await {
            Ok(flags) => {
                *self.flags.write() = flags;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Service flags refresh failed, keeping cached flags");
                Err(e)
            }
        }
    }

    pub fn flags(&self) -> ServiceFlags {
        self.flags.read().clone()
    }

    /// Pure admission decision against the cached flags and current session
    pub fn evaluate(&self) -> Result<(), AccessDenial> {
        let flags = self.flags.read();
        if flags.is_paused {
            let message = flags
                .pause_message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(MAINTENANCE_MESSAGE)
                .to_string();
            return Err(AccessDenial::Paused { message });
        }
        if flags.allowlist_only && !self.session.session().is_authenticated() {
            return Err(AccessDenial::SignInRequired);
        }
        Ok(())
    }

    /// Check whether `label` may proceed, notifying the user on denial.
    pub fn check_access(&self, label: &str) -> bool {
        match self.evaluate() {
            Ok(()) => true,
            Err(denial) => {
                tracing::info!(label, denial = ?denial, "Action blocked by service gate");
                self.notifier.notify(Notification::warning(denial.message()));
                false
            }
        }
    }

    /// Run `action` if the gate allows it.
    ///
    /// Returns `Ok(None)` on denial (the action is never invoked), `Ok(Some(_))` when the
    /// action succeeds, and the action's own error otherwise.
    pub async fn run_guarded<F, Fut, T, E>(&self, label: &str, action: F) -> Result<Option<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        if !self.check_access(label) {
            return Ok(None);
        }
        match action().await {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::error!(label, error = %e, "Guarded action failed");
                Err(e)
            }
        }
    }

    /// Wrap `action` into a zero-argument callable that runs it through the gate on
    /// every invocation.
    pub fn guarded_action<F, Fut, T, E>(
        self: &Arc<Self>,
        label: impl Into<String>,
        action: F,
    ) -> impl Fn() -> BoxFuture<'static, Result<Option<T>, E>> + Send + Sync + 'static
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Display + Send + 'static,
    {
        let gate = Arc::clone(self);
        let label: Arc<str> = Arc::from(label.into());
        let action = Arc::new(action);

        move || {
            let gate = Arc::clone(&gate);
            let label = Arc::clone(&label);
            let action = Arc::clone(&action);
            async move { gate.run_guarded(&label, || (*action)()).await }.boxed()
        }
    }
}

impl std::fmt::Debug for ServiceGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceGate")
            .field("flags", &*self.flags.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notifications::{ChannelNotifier, NotificationLevel};
    use crate::test_support::{TestSession, TestSettings};
    use shared::Session;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn build_gate(flags: ServiceFlags, session: Session) -> (Arc<ServiceGate>, async_channel::Receiver<Notification>) {
        let (notifier, rx) = ChannelNotifier::new();
        let gate = ServiceGate::new(flags, TestSession::new(session), Arc::new(notifier));
        (Arc::new(gate), rx)
    }

    #[test]
    fn test_paused_denies_regardless_of_auth() {
        for session in [Session::anonymous(), Session::signed_in("u1"), Session::loading()] {
            let (gate, rx) = build_gate(ServiceFlags::paused(None), session);
            assert!(!gate.check_access("like"));

            let note = rx.try_recv().unwrap();
            assert_eq!(note.level, NotificationLevel::Warning);
            assert_eq!(note.message, MAINTENANCE_MESSAGE);
        }
    }

    #[test]
    fn test_paused_uses_custom_message() {
        let (gate, rx) = build_gate(
            ServiceFlags::paused(Some("Back at 14:00 UTC".to_string())),
            Session::signed_in("u1"),
        );
        assert_eq!(
            gate.evaluate(),
            Err(AccessDenial::Paused {
                message: "Back at 14:00 UTC".to_string()
            })
        );
        assert!(!gate.check_access("mint"));
        assert_eq!(rx.try_recv().unwrap().message, "Back at 14:00 UTC");
    }

    #[test]
    fn test_allowlist_requires_sign_in() {
        let (gate, rx) = build_gate(ServiceFlags::allowlist_only(), Session::anonymous());
        assert!(!gate.check_access("follow"));
        assert_eq!(rx.try_recv().unwrap().message, SIGN_IN_REQUIRED_MESSAGE);

        let (gate, rx) = build_gate(ServiceFlags::allowlist_only(), Session::signed_in("u1"));
        assert!(gate.check_access("follow"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_default_flags_allow_everyone() {
        let (gate, rx) = build_gate(ServiceFlags::default(), Session::anonymous());
        assert!(gate.check_access("like"));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_load_fails_open() {
        let (notifier, _rx) = ChannelNotifier::new();
        let source = TestSettings(Err(ServiceError::Network("offline".to_string())));
        let gate = ServiceGate::load(&source, TestSession::new(Session::anonymous()), Arc::new(notifier)).await;

        assert_eq!(gate.flags(), ServiceFlags::default());
        assert!(gate.check_access("like"));
    }

    #[tokio::test]
    async fn test_refresh_keeps_cached_flags_on_failure() {
        let (gate, _rx) = build_gate(ServiceFlags::paused(None), Session::anonymous());

        let failing = TestSettings(Err(ServiceError::Network("offline".to_string())));
        assert!(gate.refresh(&failing).await.is_err());
        assert!(gate.flags().is_paused);

        let healthy = TestSettings(Ok(ServiceFlags::default()));
        gate.refresh(&healthy).await.unwrap();
        assert!(!gate.flags().is_paused);
    }

    #[tokio::test]
    async fn test_guarded_action_never_runs_when_paused() {
        let (gate, rx) = build_gate(ServiceFlags::paused(None), Session::signed_in("u1"));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let guarded = gate.guarded_action("mint", move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(())
            }
        });

        assert_eq!(guarded().await, Ok(None));
        assert_eq!(guarded().await, Ok(None));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(rx.len(), 2);
    }

    #[tokio::test]
    async fn test_guarded_action_runs_and_returns_value() {
        let (gate, _rx) = build_gate(ServiceFlags::default(), Session::anonymous());
        let guarded = gate.guarded_action("like", || async { Ok::<_, String>(42) });
        assert_eq!(guarded().await, Ok(Some(42)));
    }

    #[tokio::test]
    async fn test_guarded_action_rethrows_action_error() {
        let (gate, rx) = build_gate(ServiceFlags::default(), Session::signed_in("u1"));
        let guarded = gate.guarded_action("follow", || async { Err::<(), _>("backend exploded".to_string()) });

        assert_eq!(guarded().await, Err("backend exploded".to_string()));
        // Action failures are the caller's to report
        assert!(rx.try_recv().is_err());
    }
}
