//! Structural request validation: required fields and value kinds, reported per field.

use crate::case::field_label;
use crate::error::{AppError, FieldErrors};
use crate::model::ChannelInput;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub kind: Option<FieldKind>,
}

/// Rules for channel create and update bodies, in reporting order.
pub const CHANNEL_RULES: &[(&str, ValidationRule)] = &[
    (
        "name",
        ValidationRule {
            required: true,
            kind: Some(FieldKind::String),
        },
    ),
    (
        "clientsCount",
        ValidationRule {
            required: true,
            kind: Some(FieldKind::Integer),
        },
    ),
];

pub struct RequestValidator;

impl RequestValidator {
    /// Check every rule and collect the first failure per field.
    pub fn validate(
        body: &Map<String, Value>,
        rules: &[(&str, ValidationRule)],
    ) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();
        for (field, rule) in rules {
            if let Some(message) = check_field(field, body.get(*field), rule) {
                errors.add(field, message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }

    /// Validate a raw channel body and extract the typed payload. The name is trimmed.
    pub fn channel_input(body: &Value) -> Result<ChannelInput, AppError> {
        let Value::Object(map) = body else {
            return Err(AppError::BadRequest("request body must be a JSON object".into()));
        };
        Self::validate(map, CHANNEL_RULES)?;
        let name = map.get("name").and_then(Value::as_str).map(str::trim);
        let clients_count = map.get("clientsCount").and_then(as_integer);
        match (name, clients_count) {
            (Some(name), Some(clients_count)) => Ok(ChannelInput::new(name, clients_count)),
            _ => Err(AppError::BadRequest("request body does not match channel fields".into())),
        }
    }
}

fn check_field(field: &str, value: Option<&Value>, rule: &ValidationRule) -> Option<String> {
    if is_blank(value) {
        return rule.required.then(|| required_message(field));
    }
    let value = value?;
    match rule.kind {
        Some(FieldKind::String) if !value.is_string() => {
            Some(format!("The {} field must be a string.", field_label(field)))
        }
        Some(FieldKind::Integer) if as_integer(value).is_none() => {
            Some(format!("The {} field must be an integer.", field_label(field)))
        }
        _ => None,
    }
}

fn required_message(field: &str) -> String {
    format!("The {} field is required.", field_label(field))
}

/// Absent, null, whitespace-only strings and empty arrays count as missing.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(_) => false,
    }
}

/// JSON integers and base-10 integer strings.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
