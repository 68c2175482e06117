//! TOPSIS scoring: distance to ideal and anti-ideal reference points.

use serde::{Deserialize, Serialize};

use crate::analysis::WeightedMatrix;
use crate::foundation::{Criterion, DegenerateWarning};

/// Score and rank for one alternative in one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    pub alternative_id: String,
    /// Relative closeness to the ideal point, in [0, 1].
    pub score: f64,
    /// 1 = most preferred. Ranks are gap-free over all alternatives.
    pub rank: usize,
}

/// Result of one complete scoring pass, entries sorted by rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub entries: Vec<RankedAlternative>,
    pub warnings: Vec<DegenerateWarning>,
}

impl RankingResult {
    /// Returns the entry for one alternative.
    pub fn entry(&self, alternative_id: &str) -> Option<&RankedAlternative> {
        self.entries
            .iter()
            .find(|e| e.alternative_id == alternative_id)
    }

    /// Returns the rank of one alternative.
    pub fn rank_of(&self, alternative_id: &str) -> Option<usize> {
        self.entry(alternative_id).map(|e| e.rank)
    }

    /// Returns the score of one alternative.
    pub fn score_of(&self, alternative_id: &str) -> Option<f64> {
        self.entry(alternative_id).map(|e| e.score)
    }

    /// Returns the top-ranked alternative.
    pub fn top(&self) -> Option<&RankedAlternative> {
        self.entries.first()
    }
}

/// Technique for Order of Preference by Similarity to Ideal Solution.
pub struct TopsisRanker;

impl TopsisRanker {
    /// Scores and ranks one weighted, normalized matrix.
    ///
    /// # Algorithm
    /// 1. Per criterion, the ideal value is the best weighted value across
    ///    alternatives (max for `benefit`, min for `cost`); the anti-ideal is
    ///    the worst.
    /// 2. Per alternative, `D+` and `D-` are the Euclidean distances to the
    ///    ideal and anti-ideal vectors.
    /// 3. Score = `D- / (D+ + D-)`.
    /// 4. Rank by descending score. Ties break by original alternative order
    ///    (the earlier alternative ranks higher); the tie-break is stable so
    ///    repeated draws aggregate consistently.
    ///
    /// # Edge Cases
    /// - `D+ + D- == 0` (all criteria degenerate): the alternative receives
    ///   the neutral score 0.5 and a `DegenerateScore` warning.
    pub fn rank(
        matrix: &WeightedMatrix,
        alternative_ids: &[String],
        criteria: &[Criterion],
    ) -> RankingResult {
        let n = matrix.alternative_count();
        let m = matrix.criterion_count();
        let mut warnings = Vec::new();

        let mut ideal = vec![0.0; m];
        let mut anti_ideal = vec![0.0; m];
        for (j, criterion) in criteria.iter().enumerate().take(m) {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for i in 0..n {
                let v = matrix.value(i, j);
                min = min.min(v);
                max = max.max(v);
            }
            if criterion.direction.is_benefit() {
                ideal[j] = max;
                anti_ideal[j] = min;
            } else {
                ideal[j] = min;
                anti_ideal[j] = max;
            }
        }

        let mut scores = Vec::with_capacity(n);
        for i in 0..n {
            let mut d_plus = 0.0;
            let mut d_minus = 0.0;
            for j in 0..m {
                let v = matrix.value(i, j);
                d_plus += (v - ideal[j]).powi(2);
                d_minus += (v - anti_ideal[j]).powi(2);
            }
            let d_plus = d_plus.sqrt();
            let d_minus = d_minus.sqrt();

            let score = if d_plus + d_minus == 0.0 {
                warnings.push(DegenerateWarning::DegenerateScore {
                    alternative: alternative_ids[i].clone(),
                });
                0.5
            } else {
                d_minus / (d_plus + d_minus)
            };
            scores.push(score);
        }

        // Stable sort on descending score keeps input order for tied scores,
        // which is the documented tie-break.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let entries = order
            .into_iter()
            .enumerate()
            .map(|(position, i)| RankedAlternative {
                alternative_id: alternative_ids[i].clone(),
                score: scores[i],
                rank: position + 1,
            })
            .collect();

        RankingResult { entries, warnings }
    }
}
