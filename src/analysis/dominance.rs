//! Pareto dominance screening of a scalar impact matrix.
//!
//! Screens out alternatives that are at least matched on every criterion and
//! strictly beaten on at least one, before (or alongside) TOPSIS scoring.

use serde::{Deserialize, Serialize};

use crate::foundation::Criterion;
use crate::matrix::ScalarMatrix;

/// An alternative dominated by another under the criterion directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominatedAlternative {
    pub alternative_id: String,
    pub dominated_by_id: String,
    pub explanation: String,
}

/// Partition of alternatives into the Pareto front and the dominated rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominancePartition {
    /// Alternatives on the Pareto front, in input order.
    pub non_dominated: Vec<String>,
    pub dominated: Vec<DominatedAlternative>,
}

/// Pareto dominance screening functions.
pub struct DominanceScreen;

impl DominanceScreen {
    /// Finds all dominated alternatives.
    ///
    /// Alternative `a` dominates `b` when `a` is at least as good as `b` on
    /// every criterion (respecting direction) and strictly better on at
    /// least one. Each dominated alternative reports one dominator.
    ///
    /// # Edge Cases
    /// - Fewer than two alternatives: returns empty Vec.
    /// - Alternatives equal on every criterion: neither dominates.
    pub fn find_dominated(
        matrix: &ScalarMatrix,
        alternative_ids: &[String],
        criteria: &[Criterion],
    ) -> Vec<DominatedAlternative> {
        let n = matrix.alternative_count();
        let mut dominated = Vec::new();
        if n < 2 {
            return dominated;
        }

        for candidate in 0..n {
            for dominator in 0..n {
                if candidate == dominator {
                    continue;
                }
                if Self::dominates(matrix, criteria, dominator, candidate) {
                    dominated.push(DominatedAlternative {
                        alternative_id: alternative_ids[candidate].clone(),
                        dominated_by_id: alternative_ids[dominator].clone(),
                        explanation: Self::explain(
                            matrix,
                            alternative_ids,
                            criteria,
                            dominator,
                            candidate,
                        ),
                    });
                    break; // One dominator per candidate is enough.
                }
            }
        }

        dominated
    }

    /// Partitions alternatives into the Pareto front and the dominated rest.
    pub fn partition(
        matrix: &ScalarMatrix,
        alternative_ids: &[String],
        criteria: &[Criterion],
    ) -> DominancePartition {
        let dominated = Self::find_dominated(matrix, alternative_ids, criteria);
        let non_dominated = alternative_ids
            .iter()
            .filter(|id| !dominated.iter().any(|d| &d.alternative_id == *id))
            .cloned()
            .collect();
        DominancePartition {
            non_dominated,
            dominated,
        }
    }

    /// Checks whether alternative `a` dominates alternative `b`.
    fn dominates(matrix: &ScalarMatrix, criteria: &[Criterion], a: usize, b: usize) -> bool {
        let mut at_least_as_good = true;
        let mut strictly_better_on_one = false;

        for (j, criterion) in criteria.iter().enumerate() {
            let va = matrix.value(a, j);
            let vb = matrix.value(b, j);
            let (better, worse) = if criterion.direction.is_benefit() {
                (va > vb, va < vb)
            } else {
                (va < vb, va > vb)
            };

            if worse {
                at_least_as_good = false;
                break;
            }
            if better {
                strictly_better_on_one = true;
            }
        }

        at_least_as_good && strictly_better_on_one
    }

    fn explain(
        matrix: &ScalarMatrix,
        alternative_ids: &[String],
        criteria: &[Criterion],
        a: usize,
        b: usize,
    ) -> String {
        let better_on: Vec<&str> = criteria
            .iter()
            .enumerate()
            .filter(|(j, criterion)| {
                let va = matrix.value(a, *j);
                let vb = matrix.value(b, *j);
                if criterion.direction.is_benefit() {
                    va > vb
                } else {
                    va < vb
                }
            })
            .map(|(_, c)| c.id.as_str())
            .collect();

        format!(
            "{} is at least as good on all criteria and strictly better on: {}",
            alternative_ids[a],
            better_on.join(", ")
        )
    }
}
