//! Schemas and their evaluation.
//!
//! This module provides:
//! - The `Schema` tree and its builder
//! - Named constraint sets
//! - Descriptor resolution
//! - The prune/run evaluator and the `fit` entry points

mod descriptor;
pub(crate) mod evaluator;
mod node;
mod registry;

pub use evaluator::{fit, fit_descriptor, fit_with, prune, run, DiscrepancySink, Fitter};
pub use node::{Fields, Schema};
pub use registry::{ConstraintFactory, ConstraintSet, ConstraintSource};
