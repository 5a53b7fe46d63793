//! Type constraints: presence plus tolerant and strict coercions.
//!
//! Unless stated otherwise, an absent (`null`) value passes through every
//! constraint here unchanged. Tolerant forms make a best-effort conversion;
//! strict forms reject anything whose type does not already match.

use super::Constraint;
use crate::core::value::{
    display_value, integer_value, is_absent, is_truthy, number_value, round_half_up, type_name,
};
use crate::core::Rejection;
use serde_json::Value;

fn expected(what: &str, value: &Value) -> Rejection {
    Rejection::new(format!(
        "Expected {what}, but received: {} (type is {})",
        display_value(value),
        type_name(value)
    ))
}

/// Accepts anything.
#[must_use]
pub fn any() -> Constraint {
    Constraint::new("any", |value| Ok(value.clone()))
}

/// Rejects absent values. The only constraint here that does.
#[must_use]
pub fn required() -> Constraint {
    Constraint::new("required", |value| {
        if is_absent(value) {
            return Err(Rejection::new(format!(
                "Is required, but received: {}",
                display_value(value)
            )));
        }
        Ok(value.clone())
    })
}

/// Strings pass; numbers and booleans are stringified.
#[must_use]
pub fn string() -> Constraint {
    Constraint::new("string", |value| match value {
        Value::Null | Value::String(_) => Ok(value.clone()),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(expected("a string", value)),
    })
}

/// Only strings pass.
#[must_use]
pub fn string_strict() -> Constraint {
    Constraint::new("stringStrict", |value| match value {
        Value::Null | Value::String(_) => Ok(value.clone()),
        _ => Err(expected("a string", value)),
    })
}

/// Numbers pass; numeric strings are parsed.
#[must_use]
pub fn number() -> Constraint {
    Constraint::new("number", |value| match value {
        Value::Null | Value::Number(_) => Ok(value.clone()),
        Value::String(s) => parse_number(s).ok_or_else(|| expected("a number", value)),
        _ => Err(expected("a number", value)),
    })
}

/// Only numbers pass.
#[must_use]
pub fn number_strict() -> Constraint {
    Constraint::new("numberStrict", |value| match value {
        Value::Null | Value::Number(_) => Ok(value.clone()),
        _ => Err(expected("a number", value)),
    })
}

/// Numbers are rounded to the nearest integer (ties toward positive
/// infinity); integer strings are parsed, other numeric strings are parsed
/// and rounded.
#[must_use]
pub fn integer() -> Constraint {
    Constraint::new("integer", |value| {
        let rounded = match value {
            Value::Null => return Ok(Value::Null),
            Value::Number(n) if n.is_i64() || n.is_u64() => return Ok(value.clone()),
            Value::Number(n) => n.as_f64().and_then(|f| integer_value(round_half_up(f))),
            Value::String(s) => parse_integer(s),
            _ => None,
        };
        rounded.ok_or_else(|| {
            Rejection::new(format!("Expected an integer, but received: {}", display_value(value)))
        })
    })
}

/// Whole numbers pass; fractional numbers and non-numbers are rejected.
#[must_use]
pub fn integer_strict() -> Constraint {
    Constraint::new("integerStrict", |value| match value {
        Value::Null => Ok(Value::Null),
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
        Value::Number(n) => n.as_f64().and_then(integer_value).ok_or_else(|| {
            Rejection::new(format!(
                "Expected an integer, but received a float: {}",
                display_value(value)
            ))
        }),
        _ => Err(Rejection::new(format!(
            "Expected an integer, but received: {}",
            display_value(value)
        ))),
    })
}

/// Booleans pass; everything else is coerced by truthiness.
///
/// No special mapping for `1`/`0` beyond ordinary truthiness.
#[must_use]
pub fn boolean() -> Constraint {
    Constraint::new("boolean", |value| match value {
        Value::Null | Value::Bool(_) => Ok(value.clone()),
        other => Ok(Value::Bool(is_truthy(other))),
    })
}

/// Only booleans pass.
#[must_use]
pub fn boolean_strict() -> Constraint {
    Constraint::new("booleanStrict", |value| match value {
        Value::Null | Value::Bool(_) => Ok(value.clone()),
        _ => Err(expected("a boolean", value)),
    })
}

fn parse_number(s: &str) -> Option<Value> {
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Value::from(i));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(number_value)
}

fn parse_integer(s: &str) -> Option<Value> {
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Value::from(i));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(|f| integer_value(round_half_up(f)))
}
