//! Normalizes a `tools/call` payload into an [`ArgumentBag`].
//!
//! Two shapes are accepted. MCP clients nest the arguments:
//!
//! ```json
//! { "name": "get_weather", "arguments": { "city": "Tokyo" } }
//! ```
//!
//! Manual callers (curl, scripts) may pass them flat, in which case the whole
//! object is the bag:
//!
//! ```json
//! { "name": "get_weather", "city": "Tokyo" }
//! ```

use serde_json::{Map, Value};

use toolgate_core::{ArgumentBag, Error};

pub const ARGUMENTS_KEY: &str = "arguments";

/// Parse raw payload text and extract its arguments.
///
/// # Errors
///
/// Returns [`Error::MalformedArguments`] if the text is not a JSON object or
/// its `arguments` member is not an object.
pub fn extract_arguments(raw: &str) -> Result<ArgumentBag, Error> {
    let payload: Value =
        serde_json::from_str(raw).map_err(|e| Error::MalformedArguments(e.to_string()))?;
    extract_from_value(&payload)
}

/// Extract arguments from an already-parsed payload.
///
/// # Errors
///
/// Same conditions as [`extract_arguments`].
pub fn extract_from_value(payload: &Value) -> Result<ArgumentBag, Error> {
    let Value::Object(envelope) = payload else {
        return Err(Error::MalformedArguments(
            "payload is not a JSON object".to_string(),
        ));
    };

    match envelope.get(ARGUMENTS_KEY) {
        Some(nested) => nested_arguments(nested),
        None => Ok(flatten(envelope)),
    }
}

fn nested_arguments(nested: &Value) -> Result<ArgumentBag, Error> {
    match nested {
        Value::Object(map) => Ok(flatten(map)),
        Value::Null => Ok(ArgumentBag::new()),
        // Some clients send the arguments object as a JSON string.
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(flatten(&map)),
            Ok(_) => Err(Error::MalformedArguments(
                "arguments string does not hold a JSON object".to_string(),
            )),
            Err(e) => Err(Error::MalformedArguments(e.to_string())),
        },
        other => Err(Error::MalformedArguments(format!(
            "arguments must be an object, got {}",
            type_name(other)
        ))),
    }
}

fn flatten(map: &Map<String, Value>) -> ArgumentBag {
    map.iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => value.to_string(),
            };
            Some((key.clone(), text))
        })
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
