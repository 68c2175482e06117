//! Analysis module - Pure services for multi-criteria scoring.
//!
//! All functions are pure and stateless: they take one scalar realization of
//! the impact matrix plus criterion metadata and return computed results.
//! The per-draw pipeline is Normalizer -> Weighter -> TopsisRanker; the
//! uncertainty engine runs it once per Monte Carlo draw.
//!
//! # Components
//!
//! - `Normalizer` - vector normalization of each criterion column
//! - `Weighter` - weight validation and column scaling
//! - `TopsisRanker` - ideal/anti-ideal distances, closeness scores, ranks
//! - `DominanceScreen` - Pareto dominance screening of alternatives

mod dominance;
mod normalizer;
mod topsis;
mod weighter;

pub use dominance::{DominancePartition, DominanceScreen, DominatedAlternative};
pub use normalizer::{NormalizedMatrix, Normalizer};
pub use topsis::{RankedAlternative, RankingResult, TopsisRanker};
pub use weighter::{WeightedMatrix, Weighter};

use crate::foundation::{AnalysisError, Criterion};
use crate::matrix::{ImpactMatrix, ScalarMatrix};

/// Runs the deterministic scoring pipeline on one scalar realization.
///
/// Warnings from normalization and scoring are carried on the result, in
/// that order. The same realization always yields the same result.
pub fn score_matrix(
    matrix: &ScalarMatrix,
    alternative_ids: &[String],
    criteria: &[Criterion],
) -> Result<RankingResult, AnalysisError> {
    if matrix.alternative_count() != alternative_ids.len() {
        return Err(AnalysisError::AlternativeCountMismatch {
            expected: alternative_ids.len(),
            actual: matrix.alternative_count(),
        });
    }
    let (normalized, mut warnings) = Normalizer::normalize(matrix, criteria);
    let weighted = Weighter::apply(&normalized, criteria)?;
    let mut result = TopsisRanker::rank(&weighted, alternative_ids, criteria);
    warnings.append(&mut result.warnings);
    result.warnings = warnings;
    Ok(result)
}

/// Scores an impact matrix once, deterministically.
///
/// Distributional cells collapse to their sample means before scoring; use
/// the uncertainty engine to propagate their spread instead.
pub fn rank(matrix: &ImpactMatrix) -> Result<RankingResult, AnalysisError> {
    score_matrix(
        &matrix.point_estimate(),
        matrix.alternative_ids(),
        matrix.criteria(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Criterion;

    #[test]
    fn rank_is_idempotent() {
        let matrix = ImpactMatrix::builder()
            .alternatives(vec!["A", "B", "C"])
            .criteria(vec![
                Criterion::cost("climate_change", 0.7),
                Criterion::benefit("hydrochar_hhv", 0.3),
            ])
            .point("A", "climate_change", 2.0)
            .point("A", "hydrochar_hhv", 18.5)
            .point("B", "climate_change", 1.4)
            .point("B", "hydrochar_hhv", 16.0)
            .point("C", "climate_change", 3.1)
            .point("C", "hydrochar_hhv", 21.0)
            .build()
            .unwrap();

        let first = rank(&matrix).unwrap();
        let second = rank(&matrix).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn score_matrix_rejects_mismatched_alternative_count() {
        let scalars = ScalarMatrix::new(vec![vec![1.0], vec![2.0]]);
        let err = score_matrix(
            &scalars,
            &["only_one".to_string()],
            &[Criterion::cost("climate_change", 1.0)],
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::AlternativeCountMismatch { .. }));
    }

    #[test]
    fn pipeline_collects_warnings_from_both_stages() {
        // One constant criterion (normalizer warning) on an otherwise valid
        // matrix; scores stay well-defined.
        let scalars = ScalarMatrix::new(vec![vec![5.0, 1.0], vec![5.0, 3.0]]);
        let ids = vec!["A".to_string(), "B".to_string()];
        let criteria = vec![
            Criterion::cost("water_use", 0.5),
            Criterion::cost("climate_change", 0.5),
        ];

        let result = score_matrix(&scalars, &ids, &criteria).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].is_criterion());
        assert_eq!(result.rank_of("A"), Some(1));
    }
}
