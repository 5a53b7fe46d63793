//! Schema trees.

use crate::constraints::{Constraint, Pipeline};
use crate::errors::{SchemaError, SuitError};
use serde_json::Value;

use super::registry::ConstraintSet;

/// A declarative tree describing the expected shape of a record.
///
/// Leaves hold a pipeline of constraints; internal nodes map field names to
/// nested schemas. Schemas are immutable once built and can be shared
/// across threads and reused for any number of `fit` calls.
#[derive(Debug, Clone)]
pub enum Schema {
    /// A single constraint or an ordered pipeline.
    Leaf(Pipeline),
    /// Named fields, in declaration order.
    Nested(Fields),
}

impl Schema {
    /// Starts an object schema.
    #[must_use]
    pub fn object() -> Fields {
        Fields::new()
    }

    /// Builds a schema from a JSON descriptor, resolving names against `set`.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for unknown names, malformed leaves or bad
    /// factory arguments.
    pub fn from_descriptor(descriptor: &Value, set: &ConstraintSet) -> Result<Self, SchemaError> {
        super::descriptor::resolve(descriptor, set)
    }

    /// Parses descriptor JSON text and resolves it against `set`.
    ///
    /// # Errors
    ///
    /// Returns [`SuitError::Serialization`] for malformed JSON and
    /// [`SuitError::Schema`] for descriptors that do not resolve.
    pub fn parse_descriptor(text: &str, set: &ConstraintSet) -> Result<Self, SuitError> {
        let descriptor: Value = serde_json::from_str(text)?;
        Ok(Self::from_descriptor(&descriptor, set)?)
    }

    /// Returns true for leaves.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns the fields of an internal node.
    #[must_use]
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            Self::Nested(fields) => Some(fields),
            Self::Leaf(_) => None,
        }
    }

    /// Returns the pipeline of a leaf.
    #[must_use]
    pub fn pipeline(&self) -> Option<&Pipeline> {
        match self {
            Self::Leaf(pipeline) => Some(pipeline),
            Self::Nested(_) => None,
        }
    }

    /// Conforms `input` with the default configuration.
    pub fn fit(&self, input: &Value) -> Result<Value, SuitError> {
        super::evaluator::fit(input, self)
    }
}

impl From<Pipeline> for Schema {
    fn from(pipeline: Pipeline) -> Self {
        Self::Leaf(pipeline)
    }
}

impl From<Constraint> for Schema {
    fn from(constraint: Constraint) -> Self {
        Self::Leaf(constraint.into())
    }
}

impl From<Vec<Constraint>> for Schema {
    fn from(stages: Vec<Constraint>) -> Self {
        Self::Leaf(stages.into())
    }
}

impl<const N: usize> From<[Constraint; N]> for Schema {
    fn from(stages: [Constraint; N]) -> Self {
        Self::Leaf(stages.into())
    }
}

impl From<Fields> for Schema {
    fn from(fields: Fields) -> Self {
        Self::Nested(fields)
    }
}

/// Ordered field declarations of an internal schema node.
///
/// Declaring a name twice replaces the earlier declaration in place.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    entries: Vec<(String, Schema)>,
}

impl Fields {
    /// Creates an empty field list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.insert(name, schema);
        self
    }

    /// Declares a field in place.
    pub fn insert(&mut self, name: impl Into<String>, schema: impl Into<Schema>) {
        let name = name.into();
        let schema = schema.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = schema,
            None => self.entries.push((name, schema)),
        }
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> Schema {
        Schema::Nested(self)
    }

    /// Looks up a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, schema)| schema)
    }

    /// Iterates over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.entries.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    /// Returns the declared names in order.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
