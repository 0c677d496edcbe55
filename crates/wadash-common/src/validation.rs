//! Input validation utilities.
//!
//! Request bodies carrying operator input are checked here before they are sent.

use std::borrow::Cow;

use validator::{Validate, ValidationError};

use crate::error::Error;

/// Validate a request body, returning an [`Error::Validation`] on failure.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), Error> {
    body.validate().map_err(|e| Error::Validation {
        message: format_validation_errors(e),
    })
}

/// Format validation errors into a human-readable string.
fn format_validation_errors(errors: validator::ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })
        })
        .collect::<Vec<_>>();
    // field_errors() is a HashMap; keep the output stable.
    messages.sort();
    messages.join("; ")
}

/// Rejects empty and whitespace-only text.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::from("Value cannot be empty or whitespace only"));
        return Err(err);
    }
    Ok(())
}

/// Validate a group name used in a route path.
pub fn validate_group_name(name: &str) -> Result<(), Error> {
    not_blank(name).map_err(|_| Error::validation("Group name cannot be empty or whitespace only"))
}
