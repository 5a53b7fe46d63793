//! # Suit
//!
//! Schema-driven conformance of untrusted records into a known shape.
//!
//! A schema is a tree whose leaves are constraints (or ordered pipelines of
//! constraints) and whose internal nodes are nested schemas. `fit` prunes an
//! input down to the declared fields, runs every leaf, and returns either
//! the coerced record or every discrepancy found in the pass:
//!
//! - **Pruning**: unknown fields are dropped, missing ones become `null`
//! - **Composition**: constraints fold left to right through a pipeline
//! - **Aggregation**: one failing field never hides another
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use suit::prelude::*;
//!
//! let schema = Schema::object()
//!     .field("username", [string(), required()])
//!     .field("email", email())
//!     .field("profile", Schema::object().field("country", string()).field("city", string()))
//!     .build();
//!
//! let output = fit(&json!({"username": "molly", "extra": 1, "profile": {"country": "US"}}), &schema)?;
//! assert_eq!(
//!     output,
//!     json!({"username": "molly", "email": null, "profile": {"country": "US", "city": null}})
//! );
//! # Ok::<(), SuitError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod constraints;
pub mod core;
pub mod errors;
pub mod schema;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{FailureMode, FitConfig};
    pub use crate::constraints::{
        any, array, boolean, boolean_strict, collection, default, email, integer,
        integer_strict, max, max_strict, min, min_strict, number, number_strict, required,
        string, string_strict, Constraint, Pipeline,
    };
    pub use crate::core::{Discrepancy, DiscrepancyReport, FieldPath, PathSegment, Rejection};
    pub use crate::errors::{SchemaError, SuitError};
    pub use crate::schema::{
        fit, fit_descriptor, fit_with, prune, ConstraintSet, ConstraintSource, Fields, Fitter,
        Schema,
    };
}
