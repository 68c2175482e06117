//! Uncertainty module - Monte Carlo propagation of input uncertainty into
//! ranking uncertainty.
//!
//! The engine repeats the scoring pipeline over many seeded draws of the
//! impact matrix (parallel map over draw indices, single-threaded reduction)
//! and folds the per-draw rankings into an [`UncertaintyReport`].

mod engine;
mod report;

pub use engine::{
    CancelToken, DrawPolicy, UncertaintyConfig, UncertaintyEngine, DEFAULT_DRAWS,
};
pub use report::{AlternativeSummary, UncertaintyReport};
