//! Resolution of JSON schema descriptors into [`Schema`] trees.
//!
//! A descriptor mirrors the shape of a schema with constraint names in
//! place of functions:
//!
//! ```json
//! {
//!   "username": ["string", "required"],
//!   "age": ["integer", "min(0)"],
//!   "email": "email",
//!   "profile": { "country": "string", "city": "string" },
//!   "tags": { "$collection": { "name": ["string", "required"] } }
//! }
//! ```
//!
//! Strings name a constraint (or call a factory with a JSON argument, as in
//! `min(0)` or `default("guest")`), arrays are pipelines, objects are nested
//! schemas, and an object whose only key is `$collection` (or `$array`)
//! applies its inner descriptor to every element of a sequence. Resolution
//! happens once, before any input is evaluated; every malformed leaf is a
//! [`SchemaError`].

use super::node::{Fields, Schema};
use super::registry::ConstraintSet;
use crate::constraints::{self, Constraint, Pipeline};
use crate::core::value::type_name;
use crate::core::FieldPath;
use crate::errors::SchemaError;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static FACTORY_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*([A-Za-z_][A-Za-z0-9_]*)\s*\((.*)\)\s*$")
        .expect("factory call pattern is a valid regex")
});

const COLLECTION_KEYS: [&str; 2] = ["$collection", "$array"];

/// Resolves a descriptor against a constraint set.
pub fn resolve(descriptor: &Value, set: &ConstraintSet) -> Result<Schema, SchemaError> {
    resolve_at(descriptor, set, &FieldPath::root())
}

fn resolve_at(descriptor: &Value, set: &ConstraintSet, path: &FieldPath) -> Result<Schema, SchemaError> {
    match descriptor {
        Value::Object(map) => match collection_item(map) {
            Some((key, item)) => Ok(Schema::from(resolve_collection(key, item, set, path)?)),
            None => {
                let mut fields = Fields::new();
                for (name, child) in map {
                    fields.insert(name.clone(), resolve_at(child, set, &path.child(name.as_str()))?);
                }
                Ok(Schema::Nested(fields))
            }
        },
        Value::String(reference) => Ok(Schema::from(resolve_reference(reference, set, path)?)),
        Value::Array(stages) => {
            let mut pipeline = Pipeline::new();
            for (index, stage) in stages.iter().enumerate() {
                pipeline = pipeline.then(resolve_stage(stage, set, &path.child(index))?);
            }
            Ok(Schema::Leaf(pipeline))
        }
        other => Err(SchemaError::invalid_leaf(display_path(path), type_name(other))),
    }
}

fn resolve_stage(stage: &Value, set: &ConstraintSet, path: &FieldPath) -> Result<Constraint, SchemaError> {
    match stage {
        Value::String(reference) => resolve_reference(reference, set, path),
        Value::Object(map) => match collection_item(map) {
            Some((key, item)) => resolve_collection(key, item, set, path),
            None => Err(SchemaError::invalid_leaf(
                display_path(path),
                "object inside a pipeline",
            )),
        },
        other => Err(SchemaError::invalid_leaf(display_path(path), type_name(other))),
    }
}

fn collection_item(map: &Map<String, Value>) -> Option<(&str, &Value)> {
    if map.len() != 1 {
        return None;
    }
    COLLECTION_KEYS
        .iter()
        .find_map(|key| map.get(*key).map(|item| (*key, item)))
}

fn resolve_collection(
    key: &str,
    item: &Value,
    set: &ConstraintSet,
    path: &FieldPath,
) -> Result<Constraint, SchemaError> {
    let item_schema = resolve_at(item, set, path)?;
    Ok(if key == "$array" {
        constraints::array(item_schema)
    } else {
        constraints::collection(item_schema)
    })
}

fn resolve_reference(
    reference: &str,
    set: &ConstraintSet,
    path: &FieldPath,
) -> Result<Constraint, SchemaError> {
    if let Some(captures) = FACTORY_CALL.captures(reference) {
        let name = &captures[1];
        let raw_argument = captures[2].trim();

        let Some(factory) = set.factory(name) else {
            return Err(if set.get(name).is_some() {
                SchemaError::invalid_argument(name, display_path(path), "takes no argument")
            } else {
                SchemaError::unknown_constraint(name, display_path(path))
            });
        };

        let argument: Value = serde_json::from_str(raw_argument).map_err(|e| {
            SchemaError::invalid_argument(name, display_path(path), format!("argument is not JSON: {e}"))
        })?;
        return factory(&argument)
            .map_err(|reason| SchemaError::invalid_argument(name, display_path(path), reason));
    }

    let name = reference.trim();
    if let Some(constraint) = set.get(name) {
        return Ok(constraint.clone());
    }
    if set.factory(name).is_some() {
        return Err(SchemaError::invalid_argument(
            name,
            display_path(path),
            "requires an argument",
        ));
    }
    Err(SchemaError::unknown_constraint(name, display_path(path)))
}

fn display_path(path: &FieldPath) -> String {
    if path.is_root() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}
