//! # Utilities Library
//!
//! Shared utility functions for environment variables, time, and validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_bool, get_env_parse};
pub use time::{format_time, is_older_than, now_utc};
pub use validation::{validate_not_empty, validate_url};
