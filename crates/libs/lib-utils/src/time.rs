//! # Time Utilities
//!
//! Utilities for time formatting and age checks using chrono.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format time as RFC3339 string.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339()
}

/// True when more than `max_age` has elapsed since `moment`.
///
/// Moments in the future are never considered old.
pub fn is_older_than(moment: DateTime<Utc>, max_age: Duration) -> bool {
    match (now_utc() - moment).to_std() {
        Ok(age) => age > max_age,
        Err(_) => false,
    }
}
