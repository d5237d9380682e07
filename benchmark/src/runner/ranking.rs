//! @ai:module:intent Rank model scores and compute batch summary statistics
//! @ai:module:layer domain
//! @ai:module:public_api BatchRanker, BatchEvaluationResult, RankedModel, SummaryStatistics
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent One entry of the ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedModel {
    pub model: String,
    pub score: f64,
}

/// @ai:intent Descriptive statistics over the scores of the evaluated models
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; 0 for fewer than two scores
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl SummaryStatistics {
    /// @ai:intent Compute statistics; all zero for no scores
    /// @ai:post std_dev is the sample standard deviation (n - 1 denominator)
    /// @ai:effects pure
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }

        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let std_dev = if scores.len() > 1 {
            let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        } else {
            0.0
        };

        let mut sorted = scores.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];

        Self {
            mean,
            median,
            std_dev,
            min,
            max,
            range: max - min,
        }
    }
}

/// @ai:intent Outcome of evaluating several model outputs against one golden standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEvaluationResult {
    pub timestamp: String,
    /// Scores of successfully evaluated models only
    pub model_scores: BTreeMap<String, f64>,
    /// Descending by score; ties keep input order
    pub rankings: Vec<RankedModel>,
    pub summary_statistics: SummaryStatistics,
    pub best_model: Option<String>,
    pub worst_model: Option<String>,
    /// Models whose evaluation failed
    #[serde(default)]
    pub excluded_models: Vec<String>,
}

/// @ai:intent Turns ordered (model, score) pairs into a ranked batch result
pub struct BatchRanker;

impl BatchRanker {
    /// @ai:intent Rank scores in descending order with a stable sort
    /// @ai:pre scores are listed in input order, one entry per model
    /// @ai:example ([m1: 0.85, m2: 0.75, m3: 0.90]) -> [m3, m1, m2], best m3, worst m2
    /// @ai:effects pure
    pub fn rank(scores: Vec<(String, f64)>, excluded_models: Vec<String>) -> BatchEvaluationResult {
        let values: Vec<f64> = scores.iter().map(|(_, s)| *s).collect();
        let summary_statistics = SummaryStatistics::from_scores(&values);

        let mut rankings: Vec<RankedModel> = scores
            .iter()
            .map(|(model, score)| RankedModel {
                model: model.clone(),
                score: *score,
            })
            .collect();
        rankings.sort_by(|a, b| b.score.total_cmp(&a.score));

        BatchEvaluationResult {
            timestamp: chrono::Utc::now().to_rfc3339(),
            model_scores: scores.into_iter().collect(),
            best_model: rankings.first().map(|r| r.model.clone()),
            worst_model: rankings.last().map(|r| r.model.clone()),
            rankings,
            summary_statistics,
            excluded_models,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scores(items: &[(&str, f64)]) -> Vec<(String, f64)> {
        items.iter().map(|(m, s)| (m.to_string(), *s)).collect()
    }

    fn order(result: &BatchEvaluationResult) -> Vec<&str> {
        result.rankings.iter().map(|r| r.model.as_str()).collect()
    }

    #[test]
    fn test_empty_batch() {
        let result = BatchRanker::rank(Vec::new(), Vec::new());

        assert!(result.model_scores.is_empty());
        assert!(result.rankings.is_empty());
        assert_eq!(result.best_model, None);
        assert_eq!(result.worst_model, None);
        assert_eq!(result.summary_statistics, SummaryStatistics::default());
    }

    #[test]
    fn test_ranking_scenario() {
        let result = BatchRanker::rank(scores(&[("m1", 0.85), ("m2", 0.75), ("m3", 0.90)]), Vec::new());

        assert_eq!(order(&result), vec!["m3", "m1", "m2"]);
        assert_eq!(result.best_model.as_deref(), Some("m3"));
        assert_eq!(result.worst_model.as_deref(), Some("m2"));
        assert!((result.summary_statistics.mean - 0.8333).abs() < 1e-4);
        assert!((result.summary_statistics.std_dev - 0.0763762615).abs() < 1e-9);
        assert_eq!(result.summary_statistics.median, 0.85);
        assert_eq!(result.summary_statistics.min, 0.75);
        assert_eq!(result.summary_statistics.max, 0.90);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let result = BatchRanker::rank(scores(&[("a", 0.9), ("b", 0.7), ("c", 0.9)]), Vec::new());
        assert_eq!(order(&result), vec!["a", "c", "b"]);

        let result = BatchRanker::rank(scores(&[("c", 0.9), ("b", 0.7), ("a", 0.9)]), Vec::new());
        assert_eq!(order(&result), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_summary_statistics() {
        let stats = SummaryStatistics::from_scores(&[0.2, 0.4, 0.6, 0.8]);

        assert!((stats.mean - 0.5).abs() < 1e-9);
        assert!((stats.median - 0.5).abs() < 1e-9);
        // squared deviations sum to 0.2 over n - 1 = 3
        assert!((stats.std_dev - (0.2_f64 / 3.0).sqrt()).abs() < 1e-9);
        assert!((stats.range - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_single_score_has_zero_spread() {
        let stats = SummaryStatistics::from_scores(&[0.42]);

        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.mean, 0.42);
        assert_eq!(stats.median, 0.42);
        assert_eq!(stats.range, 0.0);
    }
}
