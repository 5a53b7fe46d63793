//! Error types for suit.
//!
//! Two tiers: data discrepancies, which are collected across a whole pass
//! and reported together, and schema configuration errors, which abort
//! immediately because they describe a broken schema rather than bad input.

use crate::core::DiscrepancyReport;
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

/// The main error type returned by `fit`.
#[derive(Debug, Clone, Error)]
pub enum SuitError {
    /// One or more fields did not conform. Carries every discrepancy.
    #[error("{0}")]
    Discrepancies(DiscrepancyReport),

    /// The schema itself is malformed.
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Descriptor or configuration text is not valid JSON for its type.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SuitError {
    /// Returns the discrepancy report, if this is a data failure.
    #[must_use]
    pub fn report(&self) -> Option<&DiscrepancyReport> {
        match self {
            Self::Discrepancies(report) => Some(report),
            _ => None,
        }
    }

    /// Consumes the error, returning the report if this is a data failure.
    #[must_use]
    pub fn into_report(self) -> Option<DiscrepancyReport> {
        match self {
            Self::Discrepancies(report) => Some(report),
            _ => None,
        }
    }

    /// Returns true for schema configuration errors.
    #[must_use]
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::Schema(_))
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::Discrepancies(report) => {
                map.insert("type".to_string(), json!("Discrepancies"));
                map.insert("discrepancies".to_string(), report.to_json());
            }
            Self::Schema(err) => {
                map.insert("type".to_string(), json!("SchemaError"));
                map.extend(err.to_dict());
            }
            Self::Serialization(reason) => {
                map.insert("type".to_string(), json!("SerializationError"));
                map.insert("reason".to_string(), json!(reason));
            }
        }

        map.insert("message".to_string(), json!(self.to_string()));
        map
    }
}

impl From<DiscrepancyReport> for SuitError {
    fn from(report: DiscrepancyReport) -> Self {
        Self::Discrepancies(report)
    }
}

impl From<serde_json::Error> for SuitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors raised while building or resolving a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A descriptor named a constraint that is not registered.
    #[error("Unknown constraint '{name}' at '{path}'")]
    UnknownConstraint {
        /// The constraint name.
        name: String,
        /// Where in the descriptor it was referenced.
        path: String,
    },

    /// A built-in constraint set name was not recognized.
    #[error("Unknown constraint set '{name}'")]
    UnknownConstraintSet {
        /// The set name.
        name: String,
    },

    /// A schema leaf was neither a constraint, a pipeline nor a nested schema.
    #[error("Schemas should be a nested object of constraints or constraint arrays; found {found} at '{path}'")]
    InvalidLeaf {
        /// Where the leaf was found.
        path: String,
        /// What was found instead.
        found: String,
    },

    /// A constraint factory rejected its argument.
    #[error("Invalid argument for '{name}' at '{path}': {reason}")]
    InvalidArgument {
        /// The factory name.
        name: String,
        /// Where in the descriptor it was referenced.
        path: String,
        /// Why the argument was rejected.
        reason: String,
    },
}

impl SchemaError {
    /// Creates an unknown constraint error.
    #[must_use]
    pub fn unknown_constraint(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnknownConstraint {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates an unknown constraint set error.
    #[must_use]
    pub fn unknown_constraint_set(name: impl Into<String>) -> Self {
        Self::UnknownConstraintSet { name: name.into() }
    }

    /// Creates an invalid leaf error.
    #[must_use]
    pub fn invalid_leaf(path: impl Into<String>, found: impl Into<String>) -> Self {
        Self::InvalidLeaf {
            path: path.into(),
            found: found.into(),
        }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(
        name: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::UnknownConstraint { name, path } => {
                map.insert("kind".to_string(), json!("UnknownConstraint"));
                map.insert("name".to_string(), json!(name));
                map.insert("path".to_string(), json!(path));
            }
            Self::UnknownConstraintSet { name } => {
                map.insert("kind".to_string(), json!("UnknownConstraintSet"));
                map.insert("name".to_string(), json!(name));
            }
            Self::InvalidLeaf { path, found } => {
                map.insert("kind".to_string(), json!("InvalidLeaf"));
                map.insert("path".to_string(), json!(path));
                map.insert("found".to_string(), json!(found));
            }
            Self::InvalidArgument { name, path, reason } => {
                map.insert("kind".to_string(), json!("InvalidArgument"));
                map.insert("name".to_string(), json!(name));
                map.insert("path".to_string(), json!(path));
                map.insert("reason".to_string(), json!(reason));
            }
        }

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Discrepancy, FieldPath};

    fn sample_report() -> DiscrepancyReport {
        DiscrepancyReport::from_discrepancies(vec![Discrepancy::new(
            FieldPath::root().child("username"),
            "Is required, but received: null",
        )])
        .unwrap()
    }

    #[test]
    fn test_discrepancies_display_as_json_array() {
        let err = SuitError::from(sample_report());
        assert_eq!(
            err.to_string(),
            r#"["username: Is required, but received: null"]"#
        );
        assert!(err.report().is_some());
        assert!(!err.is_schema_error());
    }

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::unknown_constraint("emial", "contact.email");
        assert_eq!(err.to_string(), "Unknown constraint 'emial' at 'contact.email'");

        let wrapped = SuitError::from(err);
        assert!(wrapped.is_schema_error());
        assert!(wrapped.report().is_none());
    }

    #[test]
    fn test_suit_error_to_dict() {
        let dict = SuitError::from(sample_report()).to_dict();
        assert_eq!(dict.get("type").unwrap(), "Discrepancies");
        assert_eq!(
            dict.get("discrepancies").unwrap(),
            &json!(["username: Is required, but received: null"])
        );

        let dict = SuitError::from(SchemaError::invalid_leaf("age", "number")).to_dict();
        assert_eq!(dict.get("type").unwrap(), "SchemaError");
        assert_eq!(dict.get("kind").unwrap(), "InvalidLeaf");
        assert_eq!(dict.get("path").unwrap(), "age");
    }

    #[test]
    fn test_serialization_error_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SuitError::from(parse_err);
        let dict = err.to_dict();
        assert_eq!(dict.get("type").unwrap(), "SerializationError");
        assert!(dict.contains_key("reason"));
    }
}
