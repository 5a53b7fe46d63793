//! Schema evaluation: prune the input to the schema's shape, then run every
//! leaf's constraints, collecting discrepancies across the whole pass.

use super::node::{Fields, Schema};
use super::registry::ConstraintSet;
use crate::config::FitConfig;
use crate::core::{Discrepancy, DiscrepancyReport, FieldPath, Rejection};
use crate::errors::SuitError;
use serde_json::{Map, Value};
use tracing::debug;

/// Accumulates discrepancies during one evaluation pass.
#[derive(Debug)]
pub struct DiscrepancySink {
    config: FitConfig,
    discrepancies: Vec<Discrepancy>,
}

impl DiscrepancySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new(config: FitConfig) -> Self {
        Self {
            config,
            discrepancies: Vec::new(),
        }
    }

    /// Records a rejection raised while evaluating the value at `path`.
    pub fn record(&mut self, path: &FieldPath, rejection: Rejection) {
        let constraint = rejection.constraint().unwrap_or("unknown").to_string();
        for discrepancy in rejection.into_discrepancies(path) {
            if self.config.log_discrepancies {
                debug!(
                    field = %discrepancy.path,
                    constraint = %constraint,
                    message = %discrepancy.message,
                    "Discrepancy recorded"
                );
            }
            self.discrepancies.push(discrepancy);
        }
    }

    /// Returns true if evaluation should stop under the configured mode.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.config.should_stop(self.discrepancies.len())
    }

    /// Returns the discrepancies recorded so far.
    #[must_use]
    pub fn discrepancies(&self) -> &[Discrepancy] {
        &self.discrepancies
    }

    /// Returns the number of recorded discrepancies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.discrepancies.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Consumes the sink, returning a report if anything was recorded.
    #[must_use]
    pub fn into_report(self) -> Option<DiscrepancyReport> {
        DiscrepancyReport::from_discrepancies(self.discrepancies)
    }
}

/// Projects `input` onto the keys declared by `schema`.
///
/// Every declared key is present in the result at every depth. Leaves keep
/// the input value when present (falsy values included) and `null`
/// otherwise; nested nodes recurse, treating a missing or non-object value
/// as empty. Undeclared keys are dropped. A leaf schema returns the input
/// unchanged. Never fails.
#[must_use]
pub fn prune(input: &Value, schema: &Schema) -> Value {
    match schema {
        Schema::Leaf(_) => input.clone(),
        Schema::Nested(fields) => Value::Object(prune_fields(input, fields)),
    }
}

fn prune_fields(input: &Value, fields: &Fields) -> Map<String, Value> {
    let source = input.as_object();
    let mut result = Map::new();

    for (key, child) in fields.iter() {
        let value = source.and_then(|map| map.get(key)).unwrap_or(&Value::Null);
        let pruned = match child {
            Schema::Nested(inner) => Value::Object(prune_fields(value, inner)),
            Schema::Leaf(_) => value.clone(),
        };
        result.insert(key.to_string(), pruned);
    }

    result
}

/// Runs every leaf of `schema` against the matching part of `pruned`.
///
/// Fields are evaluated in declaration order. A failing field records its
/// discrepancies in `sink` and does not prevent its siblings from being
/// evaluated (unless the sink is in fail-fast mode). Its output is the
/// rejection's partial value when there is one, `null` otherwise.
pub fn run(pruned: &Value, schema: &Schema, sink: &mut DiscrepancySink) -> Value {
    run_at(pruned, schema, &FieldPath::root(), sink)
}

fn run_at(value: &Value, schema: &Schema, path: &FieldPath, sink: &mut DiscrepancySink) -> Value {
    match schema {
        Schema::Leaf(pipeline) => match pipeline.apply(value.clone()) {
            Ok(conformed) => conformed,
            Err(mut rejection) => {
                let partial = rejection.take_partial();
                sink.record(path, rejection);
                partial.unwrap_or(Value::Null)
            }
        },
        Schema::Nested(fields) => {
            let mut result = Map::new();
            for (key, child) in fields.iter() {
                if sink.should_stop() {
                    break;
                }
                let field_value = value.get(key).unwrap_or(&Value::Null);
                let field_path = path.child(key);
                tracing::trace!(field = %field_path, "Evaluating field");
                let conformed = run_at(field_value, child, &field_path, sink);
                result.insert(key.to_string(), conformed);
            }
            Value::Object(result)
        }
    }
}

/// Prunes and runs with a fresh sink, returning the raw discrepancy list.
pub(crate) fn conform(
    input: &Value,
    schema: &Schema,
    config: &FitConfig,
) -> Result<Value, Vec<Discrepancy>> {
    let mut sink = DiscrepancySink::new(config.clone());
    let output = run(&prune(input, schema), schema, &mut sink);
    if sink.is_empty() {
        Ok(output)
    } else {
        Err(sink.discrepancies)
    }
}

/// Conforms `input` to `schema` with the default configuration.
///
/// Returns the coerced record, or every discrepancy found in the pass.
pub fn fit(input: &Value, schema: &Schema) -> Result<Value, SuitError> {
    fit_with(input, schema, &FitConfig::default())
}

/// Conforms `input` to `schema` with an explicit configuration.
pub fn fit_with(input: &Value, schema: &Schema, config: &FitConfig) -> Result<Value, SuitError> {
    debug!(
        field_count = schema.fields().map_or(0, Fields::len),
        failure_mode = ?config.failure_mode,
        "Fitting input"
    );

    let mut sink = DiscrepancySink::new(config.clone());
    let output = run(&prune(input, schema), schema, &mut sink);

    match sink.into_report() {
        None => {
            debug!("Input conformed");
            Ok(output)
        }
        Some(report) => {
            debug!(discrepancies = report.len(), "Input did not conform");
            Err(SuitError::Discrepancies(report))
        }
    }
}

/// Resolves `descriptor` against `set`, then conforms `input` to it.
///
/// Schema errors are returned before any field is evaluated.
pub fn fit_descriptor(
    input: &Value,
    descriptor: &Value,
    set: &ConstraintSet,
) -> Result<Value, SuitError> {
    let schema = Schema::from_descriptor(descriptor, set)?;
    fit(input, &schema)
}

/// A schema bound to a configuration, reusable across many inputs.
#[derive(Debug, Clone)]
pub struct Fitter {
    schema: Schema,
    config: FitConfig,
}

impl Fitter {
    /// Creates a fitter with the default configuration.
    #[must_use]
    pub fn new(schema: impl Into<Schema>) -> Self {
        Self {
            schema: schema.into(),
            config: FitConfig::default(),
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: FitConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Conforms one input.
    pub fn fit(&self, input: &Value) -> Result<Value, SuitError> {
        fit_with(input, &self.schema, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{any, email, integer, number_strict, required, string, Constraint};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn user_schema() -> Schema {
        Schema::object()
            .field("username", [string(), required()])
            .field("age", any())
            .field("email", email())
            .field(
                "profile",
                Schema::object().field("country", string()).field("city", string()),
            )
            .build()
    }

    fn keys(value: &Value) -> Vec<&str> {
        value.as_object().unwrap().keys().map(String::as_str).collect()
    }

    #[test]
    fn test_prune_projects_onto_schema_keys() {
        let pruned = prune(
            &json!({"username": "molly", "extra": "x", "profile": {"country": "US", "zip": 1}}),
            &user_schema(),
        );
        assert_eq!(
            pruned,
            json!({
                "username": "molly",
                "age": null,
                "email": null,
                "profile": {"country": "US", "city": null}
            })
        );
        assert_eq!(keys(&pruned), vec!["username", "age", "email", "profile"]);
    }

    #[test]
    fn test_prune_keeps_falsy_values() {
        let schema = Schema::object()
            .field("count", any())
            .field("flag", any())
            .field("name", any())
            .build();
        let pruned = prune(&json!({"count": 0, "flag": false, "name": ""}), &schema);
        assert_eq!(pruned, json!({"count": 0, "flag": false, "name": ""}));
    }

    #[test]
    fn test_prune_treats_non_objects_as_empty() {
        let schema = user_schema();
        for input in [json!(null), json!("text"), json!([1, 2]), json!({"profile": 5})] {
            let pruned = prune(&input, &schema);
            assert_eq!(keys(&pruned), vec!["username", "age", "email", "profile"]);
            assert_eq!(keys(&pruned["profile"]), vec!["country", "city"]);
        }
    }

    #[test]
    fn test_prune_is_idempotent() {
        let schema = user_schema();
        let once = prune(&json!({"username": "m", "x": 1, "profile": {"y": 2}}), &schema);
        assert_eq!(prune(&once, &schema), once);
    }

    #[test]
    fn test_run_collects_all_failures() {
        let schema = Schema::object()
            .field("username", [string(), required()])
            .field("email", email())
            .build();
        let mut sink = DiscrepancySink::new(FitConfig::default());
        let output = run(&json!({"username": null, "email": "bad"}), &schema, &mut sink);

        assert_eq!(sink.len(), 2);
        assert_eq!(output, json!({"username": null, "email": null}));
        assert_eq!(sink.discrepancies()[0].to_string(), "username: Is required, but received: null");
        assert_eq!(sink.discrepancies()[1].to_string(), "email: Not a valid email: bad");
    }

    #[test]
    fn test_run_keeps_valid_collection_elements() {
        let schema = Schema::object()
            .field(
                "tags",
                crate::constraints::collection(
                    Schema::object().field("name", [string(), required()]),
                ),
            )
            .build();
        let mut sink = DiscrepancySink::new(FitConfig::default());
        let pruned = prune(&json!({"tags": [{"name": "a", "x": 1}, {}]}), &schema);
        let output = run(&pruned, &schema, &mut sink);

        assert_eq!(output["tags"][0], json!({"name": "a"}));
        assert_eq!(output["tags"][1], Value::Null);
        assert_eq!(
            sink.discrepancies()[0].to_string(),
            "tags[1].name: Is required, but received: null"
        );
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_fail_fast_reports_whole_collection_field() {
        let schema = Schema::object()
            .field(
                "tags",
                crate::constraints::collection(Schema::object().field("name", required())),
            )
            .field("email", email())
            .build();
        let err = fit_with(
            &json!({"tags": [{}, {}], "email": "bad"}),
            &schema,
            &FitConfig::new().fail_fast(),
        )
        .unwrap_err();
        assert_eq!(
            err.report().unwrap().to_json_strings(),
            vec![
                "tags[0].name: Is required, but received: null",
                "tags[1].name: Is required, but received: null",
            ]
        );
    }

    #[test]
    fn test_run_receives_pruned_value() {
        let seen = Constraint::new("seen", |value| Ok(json!({"saw": value.clone()})));
        let schema = Schema::object()
            .field("profile", Schema::object().field("city", seen))
            .build();
        let output = fit(&json!({"profile": {"town": "x"}}), &schema).unwrap();
        assert_eq!(output, json!({"profile": {"city": {"saw": null}}}));
    }

    #[test]
    fn test_fit_fail_fast_reports_one() {
        let schema = Schema::object()
            .field("a", required())
            .field("b", required())
            .build();
        let err = fit_with(&json!({}), &schema, &FitConfig::new().fail_fast()).unwrap_err();
        assert_eq!(err.report().unwrap().to_json_strings(), vec!["a: Is required, but received: null"]);

        let err = fit(&json!({}), &schema).unwrap_err();
        assert_eq!(err.report().unwrap().len(), 2);
    }

    #[test]
    fn test_fit_leaf_schema_applies_to_raw_value() {
        let schema = Schema::from([string(), required()]);
        assert_eq!(fit(&json!(45), &schema).unwrap(), json!("45"));

        let err = fit(&json!(null), &schema).unwrap_err();
        assert_eq!(
            err.report().unwrap().to_json_strings(),
            vec!["Is required, but received: null"]
        );

        let err = fit(&json!("x"), &Schema::from(number_strict())).unwrap_err();
        assert_eq!(err.report().unwrap().len(), 1);
    }

    #[test]
    fn test_fitter_reuses_schema() {
        let fitter = Fitter::new(Schema::object().field("n", integer()));
        assert_eq!(fitter.fit(&json!({"n": 2.5})).unwrap(), json!({"n": 3}));
        assert_eq!(fitter.fit(&json!({"n": "7"})).unwrap(), json!({"n": 7}));
        assert!(fitter.fit(&json!({"n": "x"})).is_err());
        assert_eq!(fitter.config().failure_mode, crate::config::FailureMode::CollectAll);
    }
}
