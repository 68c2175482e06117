//! Impact matrix: per-alternative, per-criterion impact values or sample sets.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::HashMap;

use crate::foundation::{AnalysisError, Criterion};

/// A single matrix cell: a point estimate or a finite empirical sample set
/// from Monte Carlo LCA.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Point(f64),
    Samples(Vec<f64>),
}

impl CellValue {
    /// Returns true if this cell carries a sample set rather than a point.
    pub fn is_distributional(&self) -> bool {
        matches!(self, CellValue::Samples(_))
    }

    fn mean(&self) -> f64 {
        match self {
            CellValue::Point(v) => *v,
            CellValue::Samples(s) => s.iter().sum::<f64>() / s.len() as f64,
        }
    }
}

/// One scalar realization of an impact matrix.
///
/// Owned transiently by a single scoring pass; rows follow the parent
/// matrix's alternative order, columns its criterion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarMatrix {
    values: Vec<Vec<f64>>,
}

impl ScalarMatrix {
    /// Creates a scalar matrix from row-major values.
    pub fn new(values: Vec<Vec<f64>>) -> Self {
        Self { values }
    }

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

    /// Iterates one column across all alternatives.
    pub fn column(&self, criterion: usize) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().map(move |row| row[criterion])
    }
}

/// Immutable impact matrix: rows = alternatives, columns = criteria.
///
/// Validated once at construction: no missing cells, all values finite, and
/// sample sets for a given criterion share one cardinality across
/// alternatives so that paired draws line up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactMatrix {
    alternative_ids: Vec<String>,
    criteria: Vec<Criterion>,
    /// Dense storage, row-major: `cells[alternative][criterion]`.
    cells: Vec<Vec<CellValue>>,
}

impl ImpactMatrix {
    /// Creates a builder for constructing an impact matrix.
    pub fn builder() -> ImpactMatrixBuilder {
        ImpactMatrixBuilder::new()
    }

    /// Ordered alternative identifiers. The order is stable for the lifetime
    /// of the matrix and fixes the rank tie-break.
    pub fn alternative_ids(&self) -> &[String] {
        &self.alternative_ids
    }

    /// Ordered criteria.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Returns the number of alternatives.
    pub fn alternative_count(&self) -> usize {
        self.alternative_ids.len()
    }

    /// Returns the number of criteria.
    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    /// Returns one cell.
    pub fn cell(&self, alternative: usize, criterion: usize) -> &CellValue {
        &self.cells[alternative][criterion]
    }

    /// Returns true if any cell carries a sample set.
    pub fn has_distributional_cells(&self) -> bool {
        self.cells
            .iter()
            .any(|row| row.iter().any(CellValue::is_distributional))
    }

    /// Returns the scalar realization for one Monte Carlo draw.
    ///
    /// A pure function of `(matrix, seed, index)`: each distributional cell
    /// samples one value uniformly from its sample set with an RNG seeded by
    /// `seed.wrapping_add(index)`; point cells pass through unchanged. Cells
    /// are visited in row-major order, so the realization is reproducible for
    /// a fixed seed and index regardless of which thread runs the draw.
    pub fn draw(&self, seed: u64, index: u64) -> ScalarMatrix {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index));
        let values = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        CellValue::Point(v) => *v,
                        CellValue::Samples(s) => s[rng.gen_range(0..s.len())],
                    })
                    .collect()
            })
            .collect();
        ScalarMatrix { values }
    }

    /// Paired draw: selects sample position `index % cardinality` within each
    /// criterion, the same position for every alternative, so correlated
    /// Monte Carlo LCA samples stay aligned across alternatives.
    pub fn draw_paired(&self, index: u64) -> ScalarMatrix {
        let values = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        CellValue::Point(v) => *v,
                        CellValue::Samples(s) => s[(index % s.len() as u64) as usize],
                    })
                    .collect()
            })
            .collect();
        ScalarMatrix { values }
    }

    /// Deterministic collapse for single-pass scoring: point cells pass
    /// through, sample cells reduce to their arithmetic mean.
    pub fn point_estimate(&self) -> ScalarMatrix {
        let values = self
            .cells
            .iter()
            .map(|row| row.iter().map(CellValue::mean).collect())
            .collect();
        ScalarMatrix { values }
    }
}

/// Builder for constructing validated [`ImpactMatrix`] instances.
#[derive(Debug, Default)]
pub struct ImpactMatrixBuilder {
    alternative_ids: Vec<String>,
    criteria: Vec<Criterion>,
    cells: HashMap<(String, String), CellValue>,
}

impl ImpactMatrixBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alternatives in their stable order.
    pub fn alternatives(mut self, ids: Vec<impl Into<String>>) -> Self {
        self.alternative_ids = ids.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Sets the criteria in column order.
    pub fn criteria(mut self, criteria: Vec<Criterion>) -> Self {
        self.criteria = criteria;
        self
    }

    /// Adds a point-valued cell.
    pub fn point(
        mut self,
        alternative_id: impl Into<String>,
        criterion_id: impl Into<String>,
        value: f64,
    ) -> Self {
        self.cells.insert(
            (alternative_id.into(), criterion_id.into()),
            CellValue::Point(value),
        );
        self
    }

    /// Adds a distributional cell from Monte Carlo samples.
    pub fn samples(
        mut self,
        alternative_id: impl Into<String>,
        criterion_id: impl Into<String>,
        samples: Vec<f64>,
    ) -> Self {
        self.cells.insert(
            (alternative_id.into(), criterion_id.into()),
            CellValue::Samples(samples),
        );
        self
    }

    /// Builds the matrix, validating shape, finiteness, and sample
    /// cardinality. Errors identify the offending alternative and criterion.
    pub fn build(self) -> Result<ImpactMatrix, AnalysisError> {
        if self.alternative_ids.is_empty() {
            return Err(AnalysisError::NoAlternatives);
        }
        if self.criteria.is_empty() {
            return Err(AnalysisError::NoCriteria);
        }

        for (i, id) in self.alternative_ids.iter().enumerate() {
            if self.alternative_ids[..i].contains(id) {
                return Err(AnalysisError::DuplicateAlternative {
                    alternative: id.clone(),
                });
            }
        }
        for (i, criterion) in self.criteria.iter().enumerate() {
            if self.criteria[..i].iter().any(|c| c.id == criterion.id) {
                return Err(AnalysisError::DuplicateCriterion {
                    criterion: criterion.id.clone(),
                });
            }
        }

        for (alternative_id, criterion_id) in self.cells.keys() {
            if !self.alternative_ids.contains(alternative_id) {
                return Err(AnalysisError::UnknownAlternative {
                    alternative: alternative_id.clone(),
                    criterion: criterion_id.clone(),
                });
            }
            if !self.criteria.iter().any(|c| &c.id == criterion_id) {
                return Err(AnalysisError::UnknownCriterion {
                    alternative: alternative_id.clone(),
                    criterion: criterion_id.clone(),
                });
            }
        }

        let mut cells = Vec::with_capacity(self.alternative_ids.len());
        for alternative_id in &self.alternative_ids {
            let mut row = Vec::with_capacity(self.criteria.len());
            for criterion in &self.criteria {
                let cell = self
                    .cells
                    .get(&(alternative_id.clone(), criterion.id.clone()))
                    .ok_or_else(|| AnalysisError::MissingCell {
                        alternative: alternative_id.clone(),
                        criterion: criterion.id.clone(),
                    })?;
                Self::check_finite(cell, alternative_id, &criterion.id)?;
                row.push(cell.clone());
            }
            cells.push(row);
        }

        // Sample sets within one criterion must share a cardinality so that
        // paired draws select the same position in every alternative.
        for (j, criterion) in self.criteria.iter().enumerate() {
            let mut expected: Option<usize> = None;
            for (row, alternative_id) in cells.iter().zip(&self.alternative_ids) {
                if let CellValue::Samples(s) = &row[j] {
                    match expected {
                        None => expected = Some(s.len()),
                        Some(n) if n != s.len() => {
                            return Err(AnalysisError::SampleCountMismatch {
                                alternative: alternative_id.clone(),
                                criterion: criterion.id.clone(),
                                expected: n,
                                actual: s.len(),
                            });
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        Ok(ImpactMatrix {
            alternative_ids: self.alternative_ids,
            criteria: self.criteria,
            cells,
        })
    }

    fn check_finite(
        cell: &CellValue,
        alternative_id: &str,
        criterion_id: &str,
    ) -> Result<(), AnalysisError> {
        let non_finite = |value: f64| AnalysisError::NonFiniteValue {
            alternative: alternative_id.to_string(),
            criterion: criterion_id.to_string(),
            value,
        };
        match cell {
            CellValue::Point(v) => {
                if !v.is_finite() {
                    return Err(non_finite(*v));
                }
            }
            CellValue::Samples(s) => {
                if s.is_empty() {
                    return Err(AnalysisError::EmptySampleSet {
                        alternative: alternative_id.to_string(),
                        criterion: criterion_id.to_string(),
                    });
                }
                if let Some(v) = s.iter().find(|v| !v.is_finite()) {
                    return Err(non_finite(*v));
                }
            }
        }
        Ok(())
    }
}
