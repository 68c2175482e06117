//! Criterion metadata: impact-category identifier, direction, and weight.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether higher or lower values are preferable for an impact category.
///
/// Most LCA impact categories are `Cost` (lower burden is better); `Benefit`
/// covers outputs such as hydrochar yield or avoided emissions credited as
/// positive values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Higher is better.
    Benefit,
    /// Lower is better.
    #[default]
    Cost,
}

impl Direction {
    /// Returns true if higher values are preferable.
    pub fn is_benefit(&self) -> bool {
        matches!(self, Direction::Benefit)
    }

    /// Returns true if lower values are preferable.
    pub fn is_cost(&self) -> bool {
        matches!(self, Direction::Cost)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Benefit => write!(f, "benefit"),
            Direction::Cost => write!(f, "cost"),
        }
    }
}

/// One impact category with its preference direction and weight.
///
/// Weights are non-negative; they need not sum to one across criteria, since
/// the weighting step rescales them proportionally before use. Weight
/// validation happens there, before any scoring pass runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub direction: Direction,
    pub weight: f64,
}

impl Criterion {
    /// Creates a criterion.
    pub fn new(id: impl Into<String>, direction: Direction, weight: f64) -> Self {
        Self {
            id: id.into(),
            direction,
            weight,
        }
    }

    /// Creates a benefit criterion (higher is better).
    pub fn benefit(id: impl Into<String>, weight: f64) -> Self {
        Self::new(id, Direction::Benefit, weight)
    }

    /// Creates a cost criterion (lower is better).
    pub fn cost(id: impl Into<String>, weight: f64) -> Self {
        Self::new(id, Direction::Cost, weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_accessors_match_variant() {
        assert!(Direction::Benefit.is_benefit());
        assert!(!Direction::Benefit.is_cost());
        assert!(Direction::Cost.is_cost());
        assert!(!Direction::Cost.is_benefit());
    }

    #[test]
    fn direction_displays_lowercase() {
        assert_eq!(format!("{}", Direction::Benefit), "benefit");
        assert_eq!(format!("{}", Direction::Cost), "cost");
    }

    #[test]
    fn direction_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Direction::Benefit).unwrap(), "\"benefit\"");
        assert_eq!(serde_json::to_string(&Direction::Cost).unwrap(), "\"cost\"");
    }

    #[test]
    fn constructors_set_direction() {
        let b = Criterion::benefit("hydrochar_hhv", 0.6);
        assert_eq!(b.direction, Direction::Benefit);
        assert_eq!(b.id, "hydrochar_hhv");
        assert!((b.weight - 0.6).abs() < f64::EPSILON);

        let c = Criterion::cost("climate_change", 0.4);
        assert_eq!(c.direction, Direction::Cost);
    }

    #[test]
    fn criterion_deserializes_from_json() {
        let json = r#"{"id":"water_use","direction":"cost","weight":0.25}"#;
        let criterion: Criterion = serde_json::from_str(json).unwrap();
        assert_eq!(criterion.id, "water_use");
        assert_eq!(criterion.direction, Direction::Cost);
    }
}
