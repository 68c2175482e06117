//! Monte Carlo uncertainty propagation over the scoring pipeline.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::analysis::{self, RankingResult, Weighter};
use crate::foundation::AnalysisError;
use crate::matrix::ImpactMatrix;
use crate::uncertainty::UncertaintyReport;

/// Default draw count when the caller does not set one.
pub const DEFAULT_DRAWS: u64 = 1000;

/// How one draw realizes the distributional cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPolicy {
    /// Independent uniform resampling from each cell's sample set, seeded
    /// per draw index.
    #[default]
    Resample,
    /// Sample position `index % cardinality` within each criterion, aligned
    /// across alternatives for correlated LCA sample streams.
    Paired,
}

/// Configuration for one uncertainty run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyConfig {
    pub draws: u64,
    /// Base seed; draw `i` uses `seed.wrapping_add(i)`.
    pub seed: u64,
    pub policy: DrawPolicy,
    /// Confidence level for per-alternative score intervals.
    pub confidence: f64,
}

impl Default for UncertaintyConfig {
    fn default() -> Self {
        Self {
            draws: DEFAULT_DRAWS,
            seed: 0,
            policy: DrawPolicy::Resample,
            confidence: 0.95,
        }
    }
}

impl UncertaintyConfig {
    /// Creates a config with the default draw count and the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// Cooperative cancellation for an uncertainty run.
///
/// Draws ask the token for admission before executing; once cancellation is
/// requested (or a draw budget is exhausted) further draws are skipped and
/// the run aggregates whatever completed.
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
    admitted: AtomicU64,
    budget: Option<u64>,
}

impl CancelToken {
    /// A token that never cancels until [`CancelToken::cancel`] is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that admits at most `budget` draws.
    pub fn after_draws(budget: u64) -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            admitted: AtomicU64::new(0),
            budget: Some(budget),
        }
    }

    /// Requests cancellation. Draws not yet started are skipped.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn admit(&self) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return false;
        }
        match self.budget {
            None => true,
            Some(budget) => self.admitted.fetch_add(1, Ordering::Relaxed) < budget,
        }
    }
}

/// Runs the scoring pipeline over repeated matrix realizations and
/// aggregates rank-stability statistics.
pub struct UncertaintyEngine;

impl UncertaintyEngine {
    /// Runs `config.draws` Monte Carlo draws and aggregates them.
    ///
    /// Deterministic: for a fixed seed, config, and matrix the report is
    /// bit-for-bit identical across runs. Draws execute in parallel; each
    /// draw's realization depends only on `(matrix, seed, index)`, and the
    /// results are folded in draw-index order by a single reduction step.
    pub fn run(
        matrix: &ImpactMatrix,
        config: &UncertaintyConfig,
    ) -> Result<UncertaintyReport, AnalysisError> {
        Self::run_with_cancel(matrix, config, &CancelToken::new())
    }

    /// Like [`UncertaintyEngine::run`], but draws consult the token before
    /// executing. The report states the actual completed count; skipped
    /// draws never enter the aggregate.
    pub fn run_with_cancel(
        matrix: &ImpactMatrix,
        config: &UncertaintyConfig,
        cancel: &CancelToken,
    ) -> Result<UncertaintyReport, AnalysisError> {
        // Weight errors are caller contract violations; surface them before
        // any draw executes.
        Weighter::normalized_weights(matrix.criteria())?;

        debug!(
            draws = config.draws,
            seed = config.seed,
            alternatives = matrix.alternative_count(),
            criteria = matrix.criterion_count(),
            "starting uncertainty run"
        );

        let outcomes: Vec<Option<Result<RankingResult, AnalysisError>>> = (0..config.draws)
            .into_par_iter()
            .map(|index| {
                if !cancel.admit() {
                    return None;
                }
                let realization = match config.policy {
                    DrawPolicy::Resample => matrix.draw(config.seed, index),
                    DrawPolicy::Paired => matrix.draw_paired(index),
                };
                Some(analysis::score_matrix(
                    &realization,
                    matrix.alternative_ids(),
                    matrix.criteria(),
                ))
            })
            .collect();

        // Single-threaded reduction in draw-index order.
        let mut results = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                None => {}
                Some(Ok(result)) => results.push(result),
                // Structurally invalid draw: fatal for the whole run.
                Some(Err(err)) => return Err(err),
            }
        }

        let report = UncertaintyReport::aggregate(
            matrix.alternative_ids(),
            &results,
            config.seed,
            config.draws,
            config.confidence,
        );

        if report.completed_draws < report.requested_draws {
            warn!(
                requested = report.requested_draws,
                completed = report.completed_draws,
                "uncertainty run cancelled before all draws completed"
            );
        }
        if report.degenerate_criterion_draws > 0 || report.degenerate_score_draws > 0 {
            debug!(
                degenerate_criterion_draws = report.degenerate_criterion_draws,
                degenerate_score_draws = report.degenerate_score_draws,
                "degenerate draws included in aggregate"
            );
        }

        Ok(report)
    }
}
