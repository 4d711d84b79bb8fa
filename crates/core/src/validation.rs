//! Shared field validation helpers.
//!
//! Payload fields that must be explicitly supplied are modelled as `Option`
//! in the DTOs so that absence can be reported as a validation error instead
//! of silently defaulting.

use crate::error::CoreError;

/// Unwrap a field that must be present in the payload.
pub fn require<T>(value: Option<T>, name: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("Missing parameter {name}")))
}

/// Reject empty or whitespace-only strings.
pub fn require_non_empty(value: &str, name: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{name} must not be empty")));
    }
    Ok(())
}
