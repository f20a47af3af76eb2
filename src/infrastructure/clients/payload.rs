#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;

use serde_json::Value;

use crate::domain::models::Property;

/// Some deployments wrap the real payload in a `body` field holding a JSON
/// encoded string. The inner payload wins when it decodes, otherwise the
/// outer payload is used as is.
pub fn unwrap_body(payload: Value) -> Value {
    if let Some(Value::String(body)) = payload.get("body") {
        if !body.is_empty() {
            match serde_json::from_str::<Value>(body) {
                Ok(inner) => {
                    tracing::debug!(body = ?inner, "Unwrapped encoded response body");
                    return inner;
                }
                Err(err) => {
                    tracing::error!(error = ?err, "Failed to parse encoded response body");
                }
            }
        }
    }

    return payload;
}

pub fn text_field(payload: &Value, key: &str) -> Option<String> {
    match payload.get(key) {
        Some(Value::String(text)) if !text.is_empty() => return Some(text.to_string()),
        Some(Value::Number(num)) => return Some(num.to_string()),
        _ => return None,
    }
}

/// Listings that fail to decode are skipped rather than failing the answer.
pub fn properties_field(payload: &Value) -> Vec<Property> {
    let entries = match payload.get("properties") {
        Some(Value::Array(entries)) => entries,
        _ => return vec![],
    };

    return entries
        .iter()
        .filter_map(|entry| {
            match serde_json::from_value::<Property>(entry.clone()) {
                Ok(property) => return Some(property),
                Err(err) => {
                    tracing::debug!(error = ?err, "Skipping undecodable property");
                    return None;
                }
            }
        })
        .collect();
}
