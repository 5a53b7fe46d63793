//! Test assertions for `fit` results.

use crate::core::DiscrepancyReport;
use crate::errors::SuitError;
use serde_json::Value;

fn expect_report(result: &Result<Value, SuitError>) -> &DiscrepancyReport {
    match result {
        Ok(value) => panic!("Expected discrepancies, but the input conformed to: {value}"),
        Err(SuitError::Discrepancies(report)) => report,
        Err(other) => panic!("Expected discrepancies, got a different error: {other}"),
    }
}

/// Asserts that `result` conformed to exactly `expected`.
pub fn assert_fits(result: &Result<Value, SuitError>, expected: &Value) {
    match result {
        Ok(actual) => assert_eq!(
            actual, expected,
            "Conformed output differs from expected"
        ),
        Err(err) => panic!("Expected input to conform, got: {err}"),
    }
}

/// Asserts that `result` failed with exactly these `<path>: <message>` lines, in order.
pub fn assert_discrepancies(result: &Result<Value, SuitError>, expected: &[&str]) {
    let actual = expect_report(result).to_json_strings();
    assert_eq!(
        actual, expected,
        "Expected discrepancies {expected:?}, got {actual:?}"
    );
}

/// Asserts that `result` failed with `count` discrepancies.
pub fn assert_discrepancy_count(result: &Result<Value, SuitError>, count: usize) {
    let report = expect_report(result);
    assert_eq!(
        report.len(),
        count,
        "Expected {count} discrepancies, got {:?}",
        report.to_json_strings()
    );
}

/// Asserts that `result` reported a discrepancy at `path`.
pub fn assert_discrepancy_for(result: &Result<Value, SuitError>, path: &str) {
    let report = expect_report(result);
    assert!(
        report.has_path(path),
        "Expected a discrepancy for '{}', got {:?}",
        path,
        report.to_json_strings()
    );
}

/// Asserts that `result` failed because the schema is malformed.
pub fn assert_schema_error(result: &Result<Value, SuitError>) {
    assert!(
        matches!(result, Err(SuitError::Schema(_))),
        "Expected a schema error, got {result:?}"
    );
}
