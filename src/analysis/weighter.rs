//! Criterion weight validation and application.

use crate::analysis::NormalizedMatrix;
use crate::foundation::{AnalysisError, Criterion};

/// A weighted, normalized matrix ready for TOPSIS scoring.
///
/// Transient, owned by one scoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedMatrix {
    values: Vec<Vec<f64>>,
}

impl WeightedMatrix {
    /// Returns the value for one alternative and criterion.
    pub fn value(&self, alternative: usize, criterion: usize) -> f64 {
        self.values[alternative][criterion]
    }

    /// Returns the number of alternatives (rows).
    pub fn alternative_count(&self) -> usize {
        self.values.len()
    }

    /// Returns the number of criteria (columns).
    pub fn criterion_count(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }
}

/// Applies criterion weights to a normalized matrix.
pub struct Weighter;

impl Weighter {
    /// Validates weights and rescales them proportionally to sum to one.
    ///
    /// Rescaling is deterministic and preserves the relative ordering of
    /// weights. Fails on any negative weight or an all-zero weight vector;
    /// callers run this before any draw executes so weight errors surface
    /// once, up front.
    pub fn normalized_weights(criteria: &[Criterion]) -> Result<Vec<f64>, AnalysisError> {
        for criterion in criteria {
            if criterion.weight < 0.0 {
                return Err(AnalysisError::NegativeWeight {
                    criterion: criterion.id.clone(),
                    weight: criterion.weight,
                });
            }
        }
        let total: f64 = criteria.iter().map(|c| c.weight).sum();
        if total == 0.0 {
            return Err(AnalysisError::DegenerateWeights);
        }
        Ok(criteria.iter().map(|c| c.weight / total).collect())
    }

    /// Scales each normalized column by its rescaled criterion weight.
    pub fn apply(
        matrix: &NormalizedMatrix,
        criteria: &[Criterion],
    ) -> Result<WeightedMatrix, AnalysisError> {
        if matrix.criterion_count() != criteria.len() {
            return Err(AnalysisError::CriterionCountMismatch {
                expected: criteria.len(),
                actual: matrix.criterion_count(),
            });
        }
        let weights = Self::normalized_weights(criteria)?;
        let values = matrix
            .clone()
            .into_values()
            .into_iter()
            .map(|row| row.iter().zip(&weights).map(|(v, w)| v * w).collect())
            .collect();
        Ok(WeightedMatrix { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Normalizer;
    use crate::matrix::ScalarMatrix;

    #[test]
    fn weights_rescale_proportionally() {
        let criteria = vec![
            Criterion::cost("a", 2.0),
            Criterion::cost("b", 1.0),
            Criterion::cost("c", 1.0),
        ];
        let weights = Weighter::normalized_weights(&criteria).unwrap();
        assert!((weights[0] - 0.5).abs() < 1e-12);
        assert!((weights[1] - 0.25).abs() < 1e-12);
        assert!((weights[2] - 0.25).abs() < 1e-12);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rescaling_preserves_weight_ordering() {
        let criteria = vec![
            Criterion::cost("a", 0.9),
            Criterion::cost("b", 0.3),
            Criterion::cost("c", 0.6),
        ];
        let weights = Weighter::normalized_weights(&criteria).unwrap();
        assert!(weights[0] > weights[2]);
        assert!(weights[2] > weights[1]);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let criteria = vec![Criterion::cost("a", 0.5), Criterion::cost("b", -0.1)];
        assert_eq!(
            Weighter::normalized_weights(&criteria).unwrap_err(),
            AnalysisError::NegativeWeight {
                criterion: "b".to_string(),
                weight: -0.1,
            }
        );
    }

    #[test]
    fn all_zero_weights_are_rejected() {
        let criteria = vec![Criterion::cost("a", 0.0), Criterion::cost("b", 0.0)];
        assert_eq!(
            Weighter::normalized_weights(&criteria).unwrap_err(),
            AnalysisError::DegenerateWeights
        );
    }

    #[test]
    fn apply_scales_columns_by_weight() {
        let criteria = vec![Criterion::cost("a", 0.6), Criterion::cost("b", 0.4)];
        let matrix = ScalarMatrix::new(vec![vec![3.0, 1.0], vec![4.0, 2.0]]);
        let (normalized, _) = Normalizer::normalize(&matrix, &criteria);
        let weighted = Weighter::apply(&normalized, &criteria).unwrap();

        for i in 0..2 {
            assert!((weighted.value(i, 0) - normalized.value(i, 0) * 0.6).abs() < 1e-12);
            assert!((weighted.value(i, 1) - normalized.value(i, 1) * 0.4).abs() < 1e-12);
        }
    }

    #[test]
    fn apply_rejects_mismatched_criterion_count() {
        let criteria = vec![Criterion::cost("a", 1.0)];
        let matrix = ScalarMatrix::new(vec![vec![1.0, 2.0]]);
        let (normalized, _) = Normalizer::normalize(&matrix, &[
            Criterion::cost("a", 1.0),
            Criterion::cost("b", 1.0),
        ]);
        let err = Weighter::apply(&normalized, &criteria).unwrap_err();
        assert!(matches!(err, AnalysisError::CriterionCountMismatch { .. }));
    }
}
