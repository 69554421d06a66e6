//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the backend or handed to the client core by its
//! external collaborators (auth provider, wallet adapter).
//!
//! ## Module Organization
//!
//! - [`auth`] - Session state and error responses
//! - [`settings`] - Service flags driving the circuit breaker
//! - [`wallet`] - Wallet connection state, link requests and responses
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/wallets/link
//! Content-Type: application/json
//!
//! {
//!   "wallet_address": "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL",
//!   "signature": "5j7s...",
//!   "message": "Sign this message to link your wallet to ...",
//!   "role": "primary"
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! { "success": true }
//! ```

pub mod auth;
pub mod settings;
pub mod wallet;

pub use auth::*;
pub use settings::*;
pub use wallet::*;
