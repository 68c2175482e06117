//! Foundation module - Shared primitives.
//!
//! Contains the criterion vocabulary (direction, weight) and the error and
//! warning types used across the engine.

mod criterion;
mod errors;

pub use criterion::{Criterion, Direction};
pub use errors::{AnalysisError, DegenerateWarning};
