//! Field-level validation shared by the creation requests.

use serde_json::json;
use thiserror::Error;

use super::Error as DomainError;

/// A required text field was missing or blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} must not be empty")]
pub struct FieldValidationError {
    field: &'static str,
}

impl FieldValidationError {
    /// Build an error for the named (camelCase) request field.
    pub fn empty(field: &'static str) -> Self {
        Self { field }
    }

    /// Request field that failed validation.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Stable machine-readable reason, e.g. `empty_username`.
    pub fn code(&self) -> String {
        format!("empty_{}", to_snake_case(self.field))
    }
}

impl From<FieldValidationError> for DomainError {
    fn from(value: FieldValidationError) -> Self {
        DomainError::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

/// Accept `value` when it has non-whitespace content.
pub(crate) fn require_text(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, FieldValidationError> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(FieldValidationError::empty(field));
    }
    Ok(value)
}

fn to_snake_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
