//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the marketplace client and the remote backend.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::auth`]**: Session state and error responses
//!   - **[`dto::settings`]**: Remote operational flags (pause / allowlist)
//!   - **[`dto::wallet`]**: Wallet connection state and wallet-linking DTOs
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::build_linking_message`]**: Deterministic challenge text for wallet linking
//!
//! ## Wire Format
//!
//! - Service flags use **camelCase** (`isPaused`, `pauseMessage`, `allowlistOnly`), the
//!   shape the settings backend publishes
//! - Everything else uses **snake_case**
//! - Optional fields are omitted from JSON when `None`
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::settings::ServiceFlags;
//! use shared::utils::build_linking_message;
//!
//! let flags: ServiceFlags = serde_json::from_str(r#"{"isPaused":true}"#).unwrap();
//! assert!(flags.is_paused);
//! assert!(!flags.allowlist_only);
//!
//! let message = build_linking_message("8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL");
//! assert!(message.contains("8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL"));
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
