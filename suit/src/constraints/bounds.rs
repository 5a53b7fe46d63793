//! Range constraints over numbers and lengths.
//!
//! Tolerant forms clamp numbers into range; strict forms reject them.
//! Strings (counted in chars) and arrays are never clamped: an out-of-range
//! length is rejected by both forms.

use super::Constraint;
use crate::core::value::{display_value, length_of, number_value, type_name};
use crate::core::Rejection;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Lower,
    Upper,
}

impl Bound {
    fn violated_by(self, candidate: f64, limit: f64) -> bool {
        match self {
            Self::Lower => candidate < limit,
            Self::Upper => candidate > limit,
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Self::Lower => "at least",
            Self::Upper => "at most",
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn len_as_f64(len: usize) -> f64 {
    len as f64
}

fn range_constraint(name: &'static str, bound: Bound, limit: f64, clamp: bool) -> Constraint {
    Constraint::new(name, move |value| match value {
        Value::Null => Ok(Value::Null),
        Value::Number(n) => {
            let candidate = n.as_f64().unwrap_or_default();
            if !bound.violated_by(candidate, limit) {
                return Ok(value.clone());
            }
            if clamp {
                return number_value(limit)
                    .ok_or_else(|| Rejection::new(format!("Cannot clamp to {limit}")));
            }
            Err(Rejection::new(format!(
                "Expected a number {} {limit}, but received: {}",
                bound.phrase(),
                display_value(value)
            )))
        }
        other => match length_of(other) {
            Some(len) if bound.violated_by(len_as_f64(len), limit) => Err(Rejection::new(format!(
                "Expected a length of {} {limit}, but received a length of {len}",
                bound.phrase()
            ))),
            Some(_) => Ok(other.clone()),
            None => Err(Rejection::new(format!(
                "Expected a number, string or array, but received: {} (type is {})",
                display_value(other),
                type_name(other)
            ))),
        },
    })
}

/// Clamps numbers up to `limit`; rejects strings/arrays shorter than `limit`.
#[must_use]
pub fn min(limit: f64) -> Constraint {
    range_constraint("min", Bound::Lower, limit, true)
}

/// Clamps numbers down to `limit`; rejects strings/arrays longer than `limit`.
#[must_use]
pub fn max(limit: f64) -> Constraint {
    range_constraint("max", Bound::Upper, limit, true)
}

/// Rejects numbers below `limit` and strings/arrays shorter than `limit`.
#[must_use]
pub fn min_strict(limit: f64) -> Constraint {
    range_constraint("minStrict", Bound::Lower, limit, false)
}

/// Rejects numbers above `limit` and strings/arrays longer than `limit`.
#[must_use]
pub fn max_strict(limit: f64) -> Constraint {
    range_constraint("maxStrict", Bound::Upper, limit, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tolerant_clamps_numbers() {
        assert_eq!(min(3.0).apply(&json!(1)).unwrap(), json!(3));
        assert_eq!(min(3.0).apply(&json!(5)).unwrap(), json!(5));
        assert_eq!(max(10.0).apply(&json!(12.5)).unwrap(), json!(10));
        assert_eq!(max(0.5).apply(&json!(2)).unwrap(), json!(0.5));
    }

    #[test]
    fn test_strict_rejects_numbers() {
        let err = min_strict(3.0).apply(&json!(1)).unwrap_err();
        assert_eq!(err.to_string(), "Expected a number at least 3, but received: 1");
        let err = max_strict(10.0).apply(&json!(11)).unwrap_err();
        assert_eq!(err.to_string(), "Expected a number at most 10, but received: 11");
        assert_eq!(max_strict(10.0).apply(&json!(10)).unwrap(), json!(10));
    }

    #[test]
    fn test_lengths_are_rejected_not_clamped() {
        for constraint in [min(3.0), min_strict(3.0)] {
            let err = constraint.apply(&json!("ab")).unwrap_err();
            assert_eq!(err.to_string(), "Expected a length of at least 3, but received a length of 2");
            assert_eq!(constraint.apply(&json!("abc")).unwrap(), json!("abc"));
        }
        for constraint in [max(2.0), max_strict(2.0)] {
            assert!(constraint.apply(&json!([1, 2, 3])).is_err());
            assert_eq!(constraint.apply(&json!([1, 2])).unwrap(), json!([1, 2]));
        }
    }

    #[test]
    fn test_other_types_rejected_and_null_passes() {
        assert!(min(1.0).apply(&json!(true)).is_err());
        assert!(max_strict(1.0).apply(&json!({"a": 1})).is_err());
        assert_eq!(min(1.0).apply(&Value::Null).unwrap(), Value::Null);
        assert_eq!(max_strict(1.0).apply(&Value::Null).unwrap(), Value::Null);
    }
}
