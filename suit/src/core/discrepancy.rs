//! Discrepancies, the per-field failures gathered during one `fit` pass.

use super::path::FieldPath;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A validation failure tied to a field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discrepancy {
    /// Where the failure happened.
    pub path: FieldPath,
    /// Human-readable description of why the value failed.
    pub message: String,
}

impl Discrepancy {
    /// Creates a discrepancy at the given path.
    #[must_use]
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Creates a discrepancy at the root path.
    #[must_use]
    pub fn at_root(message: impl Into<String>) -> Self {
        Self::new(FieldPath::root(), message)
    }

    /// Returns a copy rooted under `prefix`.
    #[must_use]
    pub fn prefixed(&self, prefix: &FieldPath) -> Self {
        Self {
            path: self.path.prefixed(prefix),
            message: self.message.clone(),
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Failure signal returned by a constraint.
///
/// Paths inside a rejection are relative to the value the constraint was
/// given. The evaluator re-roots them under the field being evaluated.
/// A rejection may carry a partial value, which the evaluator keeps in the
/// output in place of `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    discrepancies: Vec<Discrepancy>,
    partial: Option<Value>,
    constraint: Option<String>,
}

impl Rejection {
    /// Rejects the whole value with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_parts(vec![Discrepancy::at_root(message)], None)
    }

    /// Rejects with discrepancies gathered from inside the value.
    ///
    /// An empty list is turned into a single generic root discrepancy so a
    /// rejection never carries nothing.
    #[must_use]
    pub fn nested(discrepancies: Vec<Discrepancy>) -> Self {
        Self::from_parts(discrepancies, None)
    }

    /// Like [`Rejection::nested`], keeping `partial` as the field's output.
    #[must_use]
    pub fn nested_with(partial: Value, discrepancies: Vec<Discrepancy>) -> Self {
        Self::from_parts(discrepancies, Some(partial))
    }

    fn from_parts(discrepancies: Vec<Discrepancy>, partial: Option<Value>) -> Self {
        let discrepancies = if discrepancies.is_empty() {
            vec![Discrepancy::at_root("Rejected")]
        } else {
            discrepancies
        };
        Self {
            discrepancies,
            partial,
            constraint: None,
        }
    }

    /// Records the name of the rejecting constraint, unless one is already set.
    #[must_use]
    pub fn raised_by(mut self, constraint: &str) -> Self {
        if self.constraint.is_none() {
            self.constraint = Some(constraint.to_string());
        }
        self
    }

    /// Returns the name of the constraint that rejected, if known.
    #[must_use]
    pub fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }

    /// Returns the discrepancies.
    #[must_use]
    pub fn discrepancies(&self) -> &[Discrepancy] {
        &self.discrepancies
    }

    /// Returns the partial value, if any.
    #[must_use]
    pub fn partial(&self) -> Option<&Value> {
        self.partial.as_ref()
    }

    /// Removes and returns the partial value.
    pub fn take_partial(&mut self) -> Option<Value> {
        self.partial.take()
    }

    /// Consumes the rejection and re-roots every discrepancy under `prefix`.
    #[must_use]
    pub fn into_discrepancies(self, prefix: &FieldPath) -> Vec<Discrepancy> {
        if prefix.is_root() {
            return self.discrepancies;
        }
        self.discrepancies
            .iter()
            .map(|d| d.prefixed(prefix))
            .collect()
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.discrepancies.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for Rejection {}

/// Ordered, non-empty list of discrepancies from one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscrepancyReport {
    discrepancies: Vec<Discrepancy>,
}

impl DiscrepancyReport {
    /// Builds a report, returning `None` when there is nothing to report.
    #[must_use]
    pub fn from_discrepancies(discrepancies: Vec<Discrepancy>) -> Option<Self> {
        if discrepancies.is_empty() {
            None
        } else {
            Some(Self { discrepancies })
        }
    }

    /// Returns the discrepancies in evaluation order.
    #[must_use]
    pub fn discrepancies(&self) -> &[Discrepancy] {
        &self.discrepancies
    }

    /// Returns the number of discrepancies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.discrepancies.len()
    }

    /// Returns true if the report holds no discrepancies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Returns true if any discrepancy is reported at `path`.
    #[must_use]
    pub fn has_path(&self, path: &str) -> bool {
        self.discrepancies.iter().any(|d| d.path.to_string() == path)
    }

    /// Returns the `<path>: <message>` lines.
    #[must_use]
    pub fn to_json_strings(&self) -> Vec<String> {
        self.discrepancies.iter().map(ToString::to_string).collect()
    }

    /// Converts to a JSON array of strings.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.to_json_strings()
                .into_iter()
                .map(Value::String)
                .collect(),
        )
    }

    /// Consumes the report.
    #[must_use]
    pub fn into_inner(self) -> Vec<Discrepancy> {
        self.discrepancies
    }
}

impl Serialize for DiscrepancyReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.discrepancies.iter().map(ToString::to_string))
    }
}

impl fmt::Display for DiscrepancyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl IntoIterator for DiscrepancyReport {
    type Item = Discrepancy;
    type IntoIter = std::vec::IntoIter<Discrepancy>;

    fn into_iter(self) -> Self::IntoIter {
        self.discrepancies.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discrepancy_display() {
        let d = Discrepancy::new(FieldPath::root().child("username"), "Is required, but received: null");
        assert_eq!(d.to_string(), "username: Is required, but received: null");

        let root = Discrepancy::at_root("Expected a number");
        assert_eq!(root.to_string(), "Expected a number");
    }

    #[test]
    fn test_rejection_reroots_paths() {
        let rejection = Rejection::nested(vec![Discrepancy::new(
            FieldPath::from_segments([1usize]).child("name"),
            "Is required, but received: null",
        )]);
        let lines: Vec<String> = rejection
            .into_discrepancies(&FieldPath::root().child("tags"))
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(lines, vec!["tags[1].name: Is required, but received: null"]);
    }

    #[test]
    fn test_empty_nested_rejection_still_rejects() {
        let rejection = Rejection::nested(Vec::new());
        assert_eq!(rejection.discrepancies().len(), 1);
        assert!(rejection.partial().is_none());
    }

    #[test]
    fn test_rejection_carries_partial_value() {
        let mut rejection = Rejection::nested_with(
            serde_json::json!([1, null]),
            vec![Discrepancy::new(FieldPath::from_segments([1usize]), "bad")],
        );
        assert_eq!(rejection.take_partial(), Some(serde_json::json!([1, null])));
        assert_eq!(rejection.take_partial(), None);
    }

    #[test]
    fn test_raised_by_keeps_innermost_name() {
        let rejection = Rejection::new("bad").raised_by("email").raised_by("pipeline(email)");
        assert_eq!(rejection.constraint(), Some("email"));
    }

    #[test]
    fn test_report_requires_entries() {
        assert!(DiscrepancyReport::from_discrepancies(Vec::new()).is_none());
    }

    #[test]
    fn test_report_serializes_as_string_array() {
        let report = DiscrepancyReport::from_discrepancies(vec![
            Discrepancy::new(FieldPath::root().child("email"), "Not a valid email: x"),
            Discrepancy::new(FieldPath::root().child("username"), "Is required, but received: null"),
        ])
        .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                "email: Not a valid email: x",
                "username: Is required, but received: null"
            ])
        );
        assert_eq!(json, report.to_json());
        assert!(report.has_path("email"));
        assert!(!report.has_path("age"));
    }
}
