//! Client-side validation errors
//!
//! Raised by form/field checks before anything is sent. These are surfaced
//! inline by the caller and never written into a store's `error` field.

use std::borrow::Cow;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    field: Cow<'static, str>,
    message: Cow<'static, str>,
}

impl ValidationError {
    pub fn new(field: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Fail with `field: must not be empty` when `value` is blank
pub fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

/// Fail when the character count of `value` falls outside `min..=max`
pub fn require_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {min} and {max} characters"),
        ));
    }
    Ok(())
}
