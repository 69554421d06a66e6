//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate that a value looks like an http(s) base URL.
pub fn validate_url(value: &str, field_name: &str) -> Result<(), String> {
    validate_not_empty(value, field_name)?;
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(format!("{} must start with http:// or https://", field_name))
    }
}
