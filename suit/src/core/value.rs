//! Helpers over `serde_json::Value` shared by the constraint library.

use serde_json::{Number, Value};

/// Returns true for the absent marker.
#[must_use]
pub fn is_absent(value: &Value) -> bool {
    value.is_null()
}

/// Short name of the value's dynamic type, used in messages.
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Renders a value for inclusion in a message. Strings are shown raw.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truthiness: `false`, `null`, zero and the empty string are falsy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Rounds to the nearest integer, ties toward positive infinity.
///
/// `4.5 -> 5`, `-4.5 -> -4`, `-4.6 -> -5`.
#[must_use]
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Converts a whole `f64` into an integer JSON number.
///
/// Returns `None` when the value is not finite, not whole, or outside `i64`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn integer_value(x: f64) -> Option<Value> {
    if !x.is_finite() || x.fract() != 0.0 {
        return None;
    }
    if x < i64::MIN as f64 || x >= i64::MAX as f64 {
        return None;
    }
    Some(Value::Number(Number::from(x as i64)))
}

/// Converts an `f64` into a JSON number, preferring the integer form for
/// whole values so `42.0` compares equal to `42`.
#[must_use]
pub fn number_value(x: f64) -> Option<Value> {
    integer_value(x).or_else(|| Number::from_f64(x).map(Value::Number))
}

/// Length of a string (in chars) or array, if the value has one.
#[must_use]
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}
