//! Constraints: the atomic unit of validation and coercion.
//!
//! This module provides:
//! - The constraint contract and pipelines
//! - Type constraints (tolerant and strict)
//! - Range constraints
//! - Form-field constraints
//! - Structural factories (`default`, `collection`)

mod bounds;
mod contract;
mod structure;
mod types;
mod ui;

pub use bounds::{max, max_strict, min, min_strict};
pub use contract::{Constraint, ConstraintFn, Pipeline};
pub use structure::{array, collection, default};
pub use types::{
    any, boolean, boolean_strict, integer, integer_strict, number, number_strict, required,
    string, string_strict,
};
pub use ui::{email, is_email, paypal_currency};
