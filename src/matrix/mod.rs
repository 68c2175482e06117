//! Impact matrix data structures.
//!
//! The [`ImpactMatrix`] is the validated entry point of the engine: one row
//! per process alternative, one column per impact criterion, each cell a
//! point estimate or a Monte Carlo sample set. Scoring passes operate on
//! transient [`ScalarMatrix`] realizations produced by the draw operations.

mod impact_matrix;

pub use impact_matrix::{CellValue, ImpactMatrix, ImpactMatrixBuilder, ScalarMatrix};
