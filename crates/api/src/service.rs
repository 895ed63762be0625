//! Shared business logic — framework-agnostic pure functions.
//!
//! Route handlers stay thin adapters over these validators.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
}

/// Maximum accepted chat message length, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Validate a chat message. Returns the trimmed text.
///
/// Blank-after-trim input is rejected here, before any network or database
/// work happens.
pub fn validate_message_text(text: &str) -> Result<String, ServiceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::BadRequest("message must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ServiceError::BadRequest(format!(
            "message must be at most {MAX_MESSAGE_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a required short text field (titles, names, roles, locations).
/// Returns the trimmed value.
pub fn validate_required(field: &str, value: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() || trimmed.len() > 200 {
        return Err(ServiceError::BadRequest(format!(
            "{field} must be 1-200 characters"
        )));
    }
    Ok(trimmed)
}

/// Validate a scene-description prompt. Returns the trimmed text.
pub fn validate_description(text: &str) -> Result<String, ServiceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::BadRequest(
            "description must not be empty".into(),
        ));
    }
    if trimmed.chars().count() > 2000 {
        return Err(ServiceError::BadRequest(
            "description must be at most 2000 characters".into(),
        ));
    }
    Ok(trimmed.to_string())
}
