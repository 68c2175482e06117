//! Error and warning types for the analysis engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing or scoring an impact matrix.
///
/// Every variant is structural: it indicates a contract violation by the
/// caller and aborts the analysis immediately. Numerical edge cases inside an
/// otherwise-valid scoring pass are not errors; they surface as
/// [`DegenerateWarning`]s and the pass still produces a usable result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Alternative '{alternative}' has no value for criterion '{criterion}'")]
    MissingCell {
        alternative: String,
        criterion: String,
    },

    #[error("Alternative '{alternative}' supplies a value for unknown criterion '{criterion}'")]
    UnknownCriterion {
        alternative: String,
        criterion: String,
    },

    #[error("Cell for unknown alternative '{alternative}', criterion '{criterion}'")]
    UnknownAlternative {
        alternative: String,
        criterion: String,
    },

    #[error("Duplicate alternative '{alternative}'")]
    DuplicateAlternative { alternative: String },

    #[error("Duplicate criterion '{criterion}'")]
    DuplicateCriterion { criterion: String },

    #[error("Impact matrix has no alternatives")]
    NoAlternatives,

    #[error("Impact matrix has no criteria")]
    NoCriteria,

    #[error(
        "Criterion '{criterion}' has {actual} samples for alternative '{alternative}', expected {expected}"
    )]
    SampleCountMismatch {
        alternative: String,
        criterion: String,
        expected: usize,
        actual: usize,
    },

    #[error("Criterion '{criterion}' has an empty sample set for alternative '{alternative}'")]
    EmptySampleSet {
        alternative: String,
        criterion: String,
    },

    #[error("Alternative '{alternative}' has non-finite value {value} for criterion '{criterion}'")]
    NonFiniteValue {
        alternative: String,
        criterion: String,
        value: f64,
    },

    #[error("Criterion '{criterion}' has negative weight {weight}")]
    NegativeWeight { criterion: String, weight: f64 },

    #[error("All criterion weights are zero")]
    DegenerateWeights,

    #[error("Matrix has {actual} criteria but {expected} were supplied")]
    CriterionCountMismatch { expected: usize, actual: usize },

    #[error("Matrix has {actual} alternatives but {expected} identifiers were supplied")]
    AlternativeCountMismatch { expected: usize, actual: usize },
}

/// Recoverable numerical edge cases within an otherwise-valid scoring pass.
///
/// Warnings ride on the pass result and are counted in aggregate reports;
/// they are never fatal and never silently discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegenerateWarning {
    /// A criterion whose column has no spread in this realization. It cannot
    /// discriminate among alternatives and contributes nothing to the ranking.
    DegenerateCriterion { criterion: String },

    /// An alternative coinciding with both the ideal and anti-ideal points.
    /// It receives the neutral score 0.5.
    DegenerateScore { alternative: String },
}

impl DegenerateWarning {
    /// Returns true for a degenerate-criterion warning.
    pub fn is_criterion(&self) -> bool {
        matches!(self, DegenerateWarning::DegenerateCriterion { .. })
    }

    /// Returns true for a degenerate-score warning.
    pub fn is_score(&self) -> bool {
        matches!(self, DegenerateWarning::DegenerateScore { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cell_identifies_alternative_and_criterion() {
        let err = AnalysisError::MissingCell {
            alternative: "rawDCW_190C_1hr".to_string(),
            criterion: "climate_change".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Alternative 'rawDCW_190C_1hr' has no value for criterion 'climate_change'"
        );
    }

    #[test]
    fn non_finite_value_reports_the_value() {
        let err = AnalysisError::NonFiniteValue {
            alternative: "A".to_string(),
            criterion: "eutrophication".to_string(),
            value: f64::INFINITY,
        };
        assert_eq!(
            format!("{}", err),
            "Alternative 'A' has non-finite value inf for criterion 'eutrophication'"
        );
    }

    #[test]
    fn negative_weight_reports_criterion_and_weight() {
        let err = AnalysisError::NegativeWeight {
            criterion: "water_use".to_string(),
            weight: -0.2,
        };
        assert_eq!(
            format!("{}", err),
            "Criterion 'water_use' has negative weight -0.2"
        );
    }

    #[test]
    fn warning_kind_accessors_distinguish_variants() {
        let crit = DegenerateWarning::DegenerateCriterion {
            criterion: "ozone_depletion".to_string(),
        };
        let score = DegenerateWarning::DegenerateScore {
            alternative: "A".to_string(),
        };

        assert!(crit.is_criterion());
        assert!(!crit.is_score());
        assert!(score.is_score());
        assert!(!score.is_criterion());
    }

    #[test]
    fn warning_serializes_to_json() {
        let warning = DegenerateWarning::DegenerateCriterion {
            criterion: "acidification".to_string(),
        };
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("DegenerateCriterion"));
        assert!(json.contains("acidification"));
    }
}
