//! Testing utilities for schemas.
//!
//! This module provides assertions over `fit` results, for this crate's
//! tests and for downstream suites that conform their own payloads.

mod assertions;

pub use assertions::{
    assert_discrepancies, assert_discrepancy_count, assert_discrepancy_for, assert_fits,
    assert_schema_error,
};
