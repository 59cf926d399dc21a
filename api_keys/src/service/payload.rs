use common::error::{AppError, Res};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parses a JSON body that must be an object (or `null`).
///
/// Derived struct deserializers also accept arrays, so the shape is checked
/// on the raw value before converting. `null` comes back as `None`.
pub(crate) fn parse_json_object<T: DeserializeOwned>(body: &[u8]) -> Res<Option<T>> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidPayload(e.to_string()))?;

    match value {
        Value::Null => Ok(None),
        Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| AppError::InvalidPayload(e.to_string())),
        other => Err(AppError::InvalidPayload(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
