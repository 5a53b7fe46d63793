//! The constraint contract and ordered pipelines of constraints.

use crate::core::Rejection;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Signature of a constraint body.
pub type ConstraintFn = dyn Fn(&Value) -> Result<Value, Rejection> + Send + Sync;

/// A named, pure value-to-value function that may reject its input.
///
/// Constraints never mutate their argument; they return a new value (or a
/// clone of the same one). Cloning a constraint is cheap.
#[derive(Clone)]
pub struct Constraint {
    name: Arc<str>,
    func: Arc<ConstraintFn>,
}

impl Constraint {
    /// Creates a constraint from a closure.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, Rejection> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    /// Returns the constraint's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the constraint against a value.
    pub fn apply(&self, value: &Value) -> Result<Value, Rejection> {
        (self.func)(value)
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// An ordered sequence of constraints applied left to right.
///
/// The output of stage `i` is the input of stage `i + 1`. The fold stops at
/// the first rejection. An empty pipeline is the identity.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    stages: Vec<Constraint>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage.
    #[must_use]
    pub fn then(mut self, constraint: Constraint) -> Self {
        self.stages.push(constraint);
        self
    }

    /// Folds `value` through every stage.
    pub fn apply(&self, value: Value) -> Result<Value, Rejection> {
        self.stages.iter().try_fold(value, |acc, stage| {
            stage.apply(&acc).map_err(|rejection| {
                tracing::trace!(constraint = stage.name(), %rejection, "Constraint rejected value");
                rejection.raised_by(stage.name())
            })
        })
    }

    /// Wraps the pipeline as a single constraint.
    #[must_use]
    pub fn into_constraint(self) -> Constraint {
        let name = format!("pipeline({})", self.names().join(", "));
        Constraint::new(name, move |value| self.apply(value.clone()))
    }

    /// Returns the stage names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(Constraint::name).collect()
    }

    /// Returns the stages.
    #[must_use]
    pub fn stages(&self) -> &[Constraint] {
        &self.stages
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the pipeline has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl From<Constraint> for Pipeline {
    fn from(constraint: Constraint) -> Self {
        Self {
            stages: vec![constraint],
        }
    }
}

impl From<Vec<Constraint>> for Pipeline {
    fn from(stages: Vec<Constraint>) -> Self {
        Self { stages }
    }
}

impl<const N: usize> From<[Constraint; N]> for Pipeline {
    fn from(stages: [Constraint; N]) -> Self {
        Self {
            stages: stages.into(),
        }
    }
}

impl FromIterator<Constraint> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}
