//! Request-shape helpers shared by the entity handlers.

use serde_json::json;

use crate::domain::Error;

/// A required non-text field was absent from the body.
pub(crate) fn missing_field_error(field: &'static str) -> Error {
    let code = format!("missing_{}", snake_case(field));
    Error::invalid_request(format!("{field} is required"))
        .with_details(json!({ "field": field, "code": code }))
}

fn snake_case(field: &str) -> String {
    field.chars().fold(String::with_capacity(field.len() + 4), |mut out, ch| {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
        out
    })
}
