//! Required-field checks for request payloads

use crate::error::ApiError;

/// Accept a field only when it is present and non-empty.
pub fn required<'a>(value: Option<&'a str>, msg: &str) -> Result<&'a str, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::Validation(msg.to_string())),
    }
}
