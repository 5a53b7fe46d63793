//! Constraint factories that shape values: fallbacks and collections.

use super::Constraint;
use crate::config::FitConfig;
use crate::core::value::{display_value, type_name};
use crate::core::{FieldPath, Rejection};
use crate::schema::{evaluator, Schema};
use serde_json::Value;

/// Substitutes `fallback` for absent values; passes anything else through.
#[must_use]
pub fn default(fallback: Value) -> Constraint {
    Constraint::new("default", move |value| {
        if value.is_null() {
            Ok(fallback.clone())
        } else {
            Ok(value.clone())
        }
    })
}

/// Conforms every element of a sequence to `item_schema`.
///
/// Each element is pruned and run like a top-level record. Every element is
/// evaluated even after one fails, and each element's discrepancies are
/// reported under its index (`[1].name`). On failure the rejection keeps the
/// conformed elements, with `null` at the failing indices. Absent values
/// pass; any other non-sequence is rejected.
#[must_use]
pub fn collection(item_schema: impl Into<Schema>) -> Constraint {
    named_collection("collection", item_schema.into())
}

/// Alias of [`collection`].
#[must_use]
pub fn array(item_schema: impl Into<Schema>) -> Constraint {
    named_collection("array", item_schema.into())
}

fn named_collection(name: &'static str, item_schema: Schema) -> Constraint {
    // Element discrepancies are logged once they are re-rooted by the caller.
    let config = FitConfig::default().with_log_discrepancies(false);

    Constraint::new(name, move |value| {
        let items = match value {
            Value::Null => return Ok(Value::Null),
            Value::Array(items) => items,
            other => {
                return Err(Rejection::new(format!(
                    "Expected an array, but received: {} (type is {})",
                    display_value(other),
                    type_name(other)
                )))
            }
        };

        let mut conformed = Vec::with_capacity(items.len());
        let mut discrepancies = Vec::new();

        for (index, item) in items.iter().enumerate() {
            match evaluator::conform(item, &item_schema, &config) {
                Ok(result) => conformed.push(result),
                Err(found) => {
                    let prefix = FieldPath::root().child(index);
                    discrepancies.extend(found.iter().map(|d| d.prefixed(&prefix)));
                    conformed.push(Value::Null);
                }
            }
        }

        if discrepancies.is_empty() {
            Ok(Value::Array(conformed))
        } else {
            Err(Rejection::nested_with(Value::Array(conformed), discrepancies))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{integer, required, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_substitutes_absent_only() {
        let constraint = default(json!("guest"));
        assert_eq!(constraint.apply(&Value::Null).unwrap(), json!("guest"));
        assert_eq!(constraint.apply(&json!("molly")).unwrap(), json!("molly"));
        assert_eq!(constraint.apply(&json!("")).unwrap(), json!(""));
    }

    #[test]
    fn test_collection_conforms_each_element() {
        let tags = collection(Schema::object().field("name", [string(), required()]));
        let result = tags
            .apply(&json!([{"name": "a", "extra": 1}, {"name": 2}]))
            .unwrap();
        assert_eq!(result, json!([{"name": "a"}, {"name": "2"}]));
    }

    #[test]
    fn test_collection_reports_every_failing_element() {
        let tags = array(Schema::object().field("name", [string(), required()]));
        let err = tags
            .apply(&json!([{}, {"name": "b"}, {"label": "c"}]))
            .unwrap_err();
        let lines: Vec<String> = err.discrepancies().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "[0].name: Is required, but received: null",
                "[2].name: Is required, but received: null",
            ]
        );
        assert_eq!(err.partial(), Some(&json!([null, {"name": "b"}, null])));
    }

    #[test]
    fn test_collection_of_scalars() {
        let numbers = collection(integer());
        assert_eq!(numbers.apply(&json!([1.5, "2", 3])).unwrap(), json!([2, 2, 3]));

        let err = numbers.apply(&json!([1, "x"])).unwrap_err();
        assert_eq!(err.to_string(), "[1]: Expected an integer, but received: x");
    }

    #[test]
    fn test_collection_rejects_non_sequences() {
        let tags = collection(string());
        assert_eq!(tags.apply(&Value::Null).unwrap(), Value::Null);
        let err = tags.apply(&json!("a,b")).unwrap_err();
        assert_eq!(err.to_string(), "Expected an array, but received: a,b (type is string)");
    }
}
