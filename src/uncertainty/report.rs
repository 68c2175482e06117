//! Aggregation of Monte Carlo scoring passes into rank-stability statistics.

use serde::{Deserialize, Serialize};

use crate::analysis::RankingResult;

/// Rank and score statistics for one alternative across completed draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeSummary {
    pub alternative_id: String,
    pub mean_score: f64,
    pub mean_rank: f64,
    /// `rank_frequency[r - 1]` = number of completed draws in which the
    /// alternative attained rank `r`.
    pub rank_frequency: Vec<u64>,
    /// Empirical probability of ranking first.
    pub top_rank_probability: f64,
    /// Empirical score interval at the report's confidence level
    /// (nearest-rank percentiles).
    pub score_interval: (f64, f64),
}

/// Rank-stability report over all completed Monte Carlo draws.
///
/// Warnings raised inside individual draws are counted here, never
/// discarded: a draw counts as degenerate when it raised at least one
/// warning of that kind, and its result is still part of the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyReport {
    pub seed: u64,
    pub requested_draws: u64,
    /// Actual number of draws aggregated; lower than `requested_draws` when
    /// the run was cancelled.
    pub completed_draws: u64,
    pub confidence: f64,
    pub degenerate_criterion_draws: u64,
    pub degenerate_score_draws: u64,
    /// Summaries in the impact matrix's alternative order. Empty when no
    /// draw completed.
    pub alternatives: Vec<AlternativeSummary>,
}

impl UncertaintyReport {
    /// Returns the summary for one alternative.
    pub fn summary_for(&self, alternative_id: &str) -> Option<&AlternativeSummary> {
        self.alternatives
            .iter()
            .find(|s| s.alternative_id == alternative_id)
    }

    /// Folds completed draw results into a report.
    ///
    /// Runs single-threaded after the parallel map, so aggregation order is
    /// the draw-index order and the output is reproducible.
    pub(crate) fn aggregate(
        alternative_ids: &[String],
        results: &[RankingResult],
        seed: u64,
        requested_draws: u64,
        confidence: f64,
    ) -> Self {
        let completed = results.len() as u64;
        let n = alternative_ids.len();

        let degenerate_criterion_draws = results
            .iter()
            .filter(|r| r.warnings.iter().any(|w| w.is_criterion()))
            .count() as u64;
        let degenerate_score_draws = results
            .iter()
            .filter(|r| r.warnings.iter().any(|w| w.is_score()))
            .count() as u64;

        let alternatives = if completed == 0 {
            Vec::new()
        } else {
            alternative_ids
                .iter()
                .map(|id| {
                    let mut scores = Vec::with_capacity(results.len());
                    let mut rank_frequency = vec![0u64; n];
                    let mut rank_sum = 0u64;
                    for result in results {
                        // Every alternative appears in every completed draw;
                        // the matrix shape is fixed across draws.
                        if let Some(entry) = result.entry(id) {
                            scores.push(entry.score);
                            rank_frequency[entry.rank - 1] += 1;
                            rank_sum += entry.rank as u64;
                        }
                    }
                    let count = scores.len() as f64;
                    let mean_score = scores.iter().sum::<f64>() / count;
                    let mean_rank = rank_sum as f64 / count;
                    let top_rank_probability = rank_frequency[0] as f64 / count;

                    AlternativeSummary {
                        alternative_id: id.clone(),
                        mean_score,
                        mean_rank,
                        rank_frequency,
                        top_rank_probability,
                        score_interval: score_interval(&mut scores, confidence),
                    }
                })
                .collect()
        };

        UncertaintyReport {
            seed,
            requested_draws,
            completed_draws: completed,
            confidence,
            degenerate_criterion_draws,
            degenerate_score_draws,
            alternatives,
        }
    }
}

/// Nearest-rank empirical interval over the sorted scores.
fn score_interval(scores: &mut [f64], confidence: f64) -> (f64, f64) {
    scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let tail = (1.0 - confidence) / 2.0;
    (percentile(scores, tail), percentile(scores, 1.0 - tail))
}

fn percentile(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    let index = (q * last as f64).round() as usize;
    sorted[index.min(last)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RankedAlternative;
    use crate::foundation::DegenerateWarning;

    fn draw(scores_and_ranks: &[(&str, f64, usize)]) -> RankingResult {
        RankingResult {
            entries: scores_and_ranks
                .iter()
                .map(|(id, score, rank)| RankedAlternative {
                    alternative_id: id.to_string(),
                    score: *score,
                    rank: *rank,
                })
                .collect(),
            warnings: Vec::new(),
        }
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn aggregate_computes_means_and_frequencies() {
        let results = vec![
            draw(&[("A", 0.8, 1), ("B", 0.2, 2)]),
            draw(&[("A", 0.6, 1), ("B", 0.4, 2)]),
            draw(&[("B", 0.7, 1), ("A", 0.3, 2)]),
        ];
        let report = UncertaintyReport::aggregate(&ids(&["A", "B"]), &results, 42, 3, 0.95);

        assert_eq!(report.completed_draws, 3);
        let a = report.summary_for("A").unwrap();
        assert!((a.mean_score - (0.8 + 0.6 + 0.3) / 3.0).abs() < 1e-12);
        assert!((a.mean_rank - (1 + 1 + 2) as f64 / 3.0).abs() < 1e-12);
        assert_eq!(a.rank_frequency, vec![2, 1]);
        assert!((a.top_rank_probability - 2.0 / 3.0).abs() < 1e-12);

        let b = report.summary_for("B").unwrap();
        assert_eq!(b.rank_frequency, vec![1, 2]);
        assert!((b.top_rank_probability - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn aggregate_counts_degenerate_draws_not_warnings() {
        let mut degenerate = draw(&[("A", 0.5, 1)]);
        degenerate.warnings = vec![
            DegenerateWarning::DegenerateCriterion {
                criterion: "c0".to_string(),
            },
            DegenerateWarning::DegenerateCriterion {
                criterion: "c1".to_string(),
            },
            DegenerateWarning::DegenerateScore {
                alternative: "A".to_string(),
            },
        ];
        let results = vec![degenerate, draw(&[("A", 0.9, 1)])];
        let report = UncertaintyReport::aggregate(&ids(&["A"]), &results, 0, 2, 0.95);

        // Two criterion warnings in one draw count once.
        assert_eq!(report.degenerate_criterion_draws, 1);
        assert_eq!(report.degenerate_score_draws, 1);
        assert_eq!(report.completed_draws, 2);
    }

    #[test]
    fn empty_results_yield_empty_summaries() {
        let report = UncertaintyReport::aggregate(&ids(&["A", "B"]), &[], 7, 1000, 0.95);
        assert_eq!(report.completed_draws, 0);
        assert_eq!(report.requested_draws, 1000);
        assert!(report.alternatives.is_empty());
    }

    #[test]
    fn score_interval_brackets_the_samples() {
        let results: Vec<RankingResult> = (0..101)
            .map(|i| draw(&[("A", i as f64 / 100.0, 1)]))
            .collect();
        let report = UncertaintyReport::aggregate(&ids(&["A"]), &results, 0, 101, 0.95);

        let summary = report.summary_for("A").unwrap();
        let (low, high) = summary.score_interval;
        // Nearest-rank on 101 sorted scores: round(0.025 * 100) = 3 and
        // round(0.975 * 100) = 98.
        assert!((low - 0.03).abs() < 1e-9);
        assert!((high - 0.98).abs() < 1e-9);
        assert!(low < summary.mean_score && summary.mean_score < high);
    }

    #[test]
    fn report_serializes_to_json() {
        let results = vec![draw(&[("A", 1.0, 1)])];
        let report = UncertaintyReport::aggregate(&ids(&["A"]), &results, 3, 1, 0.9);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"seed\":3"));
        assert!(json.contains("rank_frequency"));
    }
}
