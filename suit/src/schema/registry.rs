//! Named constraint sets used to resolve schema descriptors.

use crate::constraints::{self, Constraint};
use crate::core::value::type_name;
use crate::errors::SchemaError;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Builds a constraint from a JSON argument, or explains why it can't.
pub type ConstraintFactory = Arc<dyn Fn(&Value) -> Result<Constraint, String> + Send + Sync>;

/// Where a constraint set comes from when loading.
#[derive(Debug, Clone)]
pub enum ConstraintSource {
    /// One of the sets shipped with the crate, by name.
    Builtin(String),
    /// A caller-built set.
    Set(ConstraintSet),
}

impl From<&str> for ConstraintSource {
    fn from(name: &str) -> Self {
        Self::Builtin(name.to_string())
    }
}

impl From<ConstraintSet> for ConstraintSource {
    fn from(set: ConstraintSet) -> Self {
        Self::Set(set)
    }
}

/// A mapping from names to constraints and constraint factories.
///
/// Built explicitly by the caller and passed to descriptor resolution.
/// Later insertions override earlier ones with the same name.
#[derive(Clone, Default)]
pub struct ConstraintSet {
    constraints: HashMap<String, Constraint>,
    factories: HashMap<String, ConstraintFactory>,
}

impl ConstraintSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The sets loaded when none are named: `basic-types` then `basic-ui`.
    #[must_use]
    pub fn standard() -> Self {
        let mut set = Self::basic_types();
        set.extend(Self::basic_ui());
        set
    }

    /// Returns a built-in set by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownConstraintSet`] for unrecognized names.
    pub fn builtin(name: &str) -> Result<Self, SchemaError> {
        match name {
            "basic-types" => Ok(Self::basic_types()),
            "basic-ui" => Ok(Self::basic_ui()),
            "basic" => Ok(Self::basic()),
            other => Err(SchemaError::unknown_constraint_set(other)),
        }
    }

    /// Loads sources in order; later sources override earlier names.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownConstraintSet`] if a built-in name is
    /// not recognized.
    pub fn load<I, S>(sources: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ConstraintSource>,
    {
        let mut set = Self::new();
        for source in sources {
            match source.into() {
                ConstraintSource::Builtin(name) => set.extend(Self::builtin(&name)?),
                ConstraintSource::Set(other) => set.extend(other),
            }
        }
        Ok(set)
    }

    /// Type constraints plus range and fallback factories.
    #[must_use]
    pub fn basic_types() -> Self {
        Self::new()
            .with(constraints::any())
            .with(constraints::required())
            .with(constraints::string())
            .with(constraints::string_strict())
            .with(constraints::number())
            .with(constraints::number_strict())
            .with(constraints::integer())
            .with(constraints::integer_strict())
            .with(constraints::boolean())
            .with(constraints::boolean_strict())
            .with_factory("min", numeric_factory(constraints::min))
            .with_factory("max", numeric_factory(constraints::max))
            .with_factory("minStrict", numeric_factory(constraints::min_strict))
            .with_factory("maxStrict", numeric_factory(constraints::max_strict))
            .with_factory(
                "default",
                Arc::new(|arg: &Value| -> Result<Constraint, String> {
                    Ok(constraints::default(arg.clone()))
                }),
            )
    }

    /// Form-field constraints.
    #[must_use]
    pub fn basic_ui() -> Self {
        Self::new().with(constraints::email())
    }

    /// The small mixed set: presence, strings, booleans, email, currency.
    #[must_use]
    pub fn basic() -> Self {
        Self::new()
            .with(constraints::any())
            .with(constraints::required())
            .with(constraints::string())
            .with(constraints::boolean())
            .with(constraints::email())
            .with(constraints::paypal_currency())
    }

    /// Adds a constraint under its own name.
    #[must_use]
    pub fn with(mut self, constraint: Constraint) -> Self {
        let name = constraint.name().to_string();
        self.insert(name, constraint);
        self
    }

    /// Adds a factory.
    #[must_use]
    pub fn with_factory(mut self, name: impl Into<String>, factory: ConstraintFactory) -> Self {
        self.insert_factory(name, factory);
        self
    }

    /// Registers a constraint under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, constraint: Constraint) {
        let name = name.into();
        if self.constraints.insert(name.clone(), constraint).is_some() {
            debug!(constraint = %name, "Constraint overridden");
        }
    }

    /// Registers a factory under `name`, replacing any previous entry.
    pub fn insert_factory(&mut self, name: impl Into<String>, factory: ConstraintFactory) {
        let name = name.into();
        if self.factories.insert(name.clone(), factory).is_some() {
            debug!(factory = %name, "Constraint factory overridden");
        }
    }

    /// Merges `other` into this set; its entries win on name clashes.
    pub fn extend(&mut self, other: Self) {
        for (name, constraint) in other.constraints {
            self.insert(name, constraint);
        }
        for (name, factory) in other.factories {
            self.insert_factory(name, factory);
        }
    }

    /// Looks up a constraint.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Constraint> {
        self.constraints.get(name)
    }

    /// Looks up a factory.
    #[must_use]
    pub fn factory(&self, name: &str) -> Option<&ConstraintFactory> {
        self.factories.get(name)
    }

    /// Returns true if a constraint or factory is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.constraints.contains_key(name) || self.factories.contains_key(name)
    }

    /// Returns every registered name, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .constraints
            .keys()
            .chain(self.factories.keys())
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Returns the number of registered constraints and factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len() + self.factories.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty() && self.factories.is_empty()
    }
}

impl fmt::Debug for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintSet")
            .field("names", &self.names())
            .finish()
    }
}

fn numeric_factory(build: fn(f64) -> Constraint) -> ConstraintFactory {
    Arc::new(move |arg: &Value| {
        arg.as_f64()
            .filter(|limit| limit.is_finite())
            .map(build)
            .ok_or_else(|| format!("expected a number, got {}", type_name(arg)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_standard_set_contents() {
        let set = ConstraintSet::standard();
        for name in ["any", "required", "string", "numberStrict", "integer", "email"] {
            assert!(set.get(name).is_some(), "missing {name}");
        }
        assert!(set.factory("min").is_some());
        assert!(set.contains("default"));
        assert!(!set.contains("paypalCurrency"));
    }

    #[test]
    fn test_builtin_names() {
        assert!(ConstraintSet::builtin("basic").unwrap().contains("paypalCurrency"));
        let err = ConstraintSet::builtin("fancy").unwrap_err();
        assert_eq!(err, SchemaError::unknown_constraint_set("fancy"));
    }

    #[test]
    fn test_later_sources_override() {
        let shout = Constraint::new("string", |value| {
            Ok(json!(value.as_str().unwrap_or_default().to_uppercase()))
        });
        let custom = ConstraintSet::new().with(shout);
        let set = ConstraintSet::load([
            ConstraintSource::from("basic-types"),
            ConstraintSource::from(custom),
        ])
        .unwrap();

        let result = set.get("string").unwrap().apply(&json!("molly")).unwrap();
        assert_eq!(result, json!("MOLLY"));
        assert!(set.contains("integer"));
    }

    #[test]
    fn test_load_rejects_unknown_builtin() {
        assert!(ConstraintSet::load(["basic-types", "nope"]).is_err());
    }

    #[test]
    fn test_numeric_factory_validates_argument() {
        let set = ConstraintSet::standard();
        let min = set.factory("min").unwrap().as_ref();
        assert_eq!(min(&json!(3)).unwrap().apply(&json!(1)).unwrap(), json!(3));
        assert!(min(&json!("three")).is_err());
    }

    #[test]
    fn test_names_sorted() {
        let names = ConstraintSet::basic_ui().names();
        assert_eq!(names, vec!["email".to_string()]);
    }
}
