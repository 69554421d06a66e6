//! # Notifications
//!
//! Toast-style notifications raised by the client core (gate denials, signing
//! cancellations, link results). The core never renders anything: notifications are
//! pushed through the [`Notifier`] trait, and [`ChannelNotifier`] forwards them over an
//! `async_channel` for the UI thread to drain.

use async_channel::{Receiver, Sender};

use crate::core::service::Notifier;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Forwards notifications to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: Sender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiver the UI drains.
    pub fn new() -> (Self, Receiver<Notification>) {
        let (tx, rx) = async_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(level = ?notification.level, message = %notification.message, "Notification");
        if self.tx.try_send(notification).is_err() {
            tracing::warn!("Notification dropped: receiver closed");
        }
    }
}

/// Logs notifications instead of showing them. Useful for headless wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => tracing::error!(message = %notification.message, "Notification"),
            NotificationLevel::Warning => tracing::warn!(message = %notification.message, "Notification"),
            _ => tracing::info!(message = %notification.message, "Notification"),
        }
    }
}
