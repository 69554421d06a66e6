//! # Services Module
//!
//! Concrete implementations of the collaborator traits in [`crate::core::service`].
//!
//! ```text
//! services/
//! ├── api/            - Backend HTTP client
//! │                     (service flags, primary-wallet lookup, wallet linking)
//! └── notifications   - Notification types and channel/log notifiers
//! ```
//!
//! ## Error Handling
//!
//! `ApiClient` maps every failure to [`crate::core::error::ServiceError`]:
//! - Network errors: `ServiceError::Network`
//! - Non-2xx status: `ServiceError::Status`, with the backend's `ErrorResponse` text when present
//! - Parse errors: `ServiceError::Parse`
//!
//! ## Thread Safety
//!
//! `ApiClient` wraps `reqwest::Client` (internally pooled and thread-safe) and can be shared
//! behind `Arc`. `ChannelNotifier` is a cloneable channel sender.

pub mod api;
pub mod notifications;
