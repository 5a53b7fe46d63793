//! Core data model for suit.
//!
//! This module contains the types shared by constraints and the evaluator:
//! - Field paths
//! - Discrepancies, rejections and the aggregated report
//! - Value helpers used by the constraint library

mod discrepancy;
mod path;
pub mod value;

pub use discrepancy::{Discrepancy, DiscrepancyReport, Rejection};
pub use path::{FieldPath, PathSegment};
