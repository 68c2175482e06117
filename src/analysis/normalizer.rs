//! Vector normalization of a scalar impact matrix.

use crate::foundation::{Criterion, DegenerateWarning};
use crate::matrix::ScalarMatrix;

/// A normalized matrix: unit-free values, same shape as its source.
///
/// Transient, owned by one scoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMatrix {
    values: Vec<Vec<f64>>,
}

impl NormalizedMatrix {
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

    pub(crate) fn into_values(self) -> Vec<Vec<f64>> {
        self.values
    }
}

/// Rescales each column to remove unit and scale differences.
pub struct Normalizer;

impl Normalizer {
    /// Vector normalization: each cell divided by the Euclidean norm of its
    /// column across all alternatives.
    ///
    /// # Edge Cases
    /// - Identically-zero column: normalizes to a zero column (no division by
    ///   zero) and raises a `DegenerateCriterion` warning.
    /// - Constant non-zero column: normalizes normally but still raises
    ///   `DegenerateCriterion`, since the criterion cannot discriminate among
    ///   alternatives in this realization.
    pub fn normalize(
        matrix: &ScalarMatrix,
        criteria: &[Criterion],
    ) -> (NormalizedMatrix, Vec<DegenerateWarning>) {
        let n = matrix.alternative_count();
        let m = matrix.criterion_count();
        let mut values = vec![vec![0.0; m]; n];
        let mut warnings = Vec::new();

        for (j, criterion) in criteria.iter().enumerate().take(m) {
            let column: Vec<f64> = matrix.column(j).collect();
            let norm = column.iter().map(|v| v * v).sum::<f64>().sqrt();

            let constant = column.iter().all(|v| *v == column[0]);
            if constant {
                warnings.push(DegenerateWarning::DegenerateCriterion {
                    criterion: criterion.id.clone(),
                });
            }

            if norm == 0.0 {
                // Zero column stays zero; the criterion contributes nothing.
                continue;
            }
            for (i, v) in column.iter().enumerate() {
                values[i][j] = v / norm;
            }
        }

        (NormalizedMatrix { values }, warnings)
    }
}
