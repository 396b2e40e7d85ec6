//! Value coercions used by the flattener
//!
//! Text coercion never fails. Float coercion fails only on values that carry
//! something other than a number.

use serde_json::Value;

/// Marker written for absent or null text fields
pub const NONE_MARKER: &str = "None";

/// Render any value as text
pub fn to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NONE_MARKER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Convert to a float; `Err` carries the rendered offending value
pub fn to_float(value: Option<&Value>) -> Result<f64, String> {
    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| n.to_string()),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| s.clone()),
        Some(other) => Err(other.to_string()),
    }
}

/// Keep booleans; null when absent; anything else as text
pub fn to_bool(value: Option<&Value>) -> super::FlatValue {
    use super::FlatValue;

    match value {
        None | Some(Value::Null) => FlatValue::Null,
        Some(Value::Bool(b)) => FlatValue::Bool(*b),
        other => FlatValue::Text(to_text(other)),
    }
}
