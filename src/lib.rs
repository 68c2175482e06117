//! Impact Rank - Multi-criteria decision engine for HTC life-cycle assessment.
//!
//! Given impact-category scores (point estimates or Monte Carlo sample sets)
//! for a set of hydrothermal-carbonization process alternatives, this crate
//! normalizes and weights the impact matrix, ranks alternatives with TOPSIS,
//! and propagates input uncertainty into rank-stability statistics.

pub mod analysis;
pub mod foundation;
pub mod matrix;
pub mod uncertainty;
