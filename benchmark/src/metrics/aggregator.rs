//! @ai:module:intent Combine per-file evaluation results into one application-level score bundle
//! @ai:module:layer application
//! @ai:module:public_api ApplicationAggregator, ApplicationAggregatorTrait
//! @ai:module:stateless true

use crate::matching::FileMatchResult;
use crate::metrics::types::{EvaluationResult, Scores};
use std::collections::BTreeMap;

/// @ai:intent Trait for application-level aggregation
pub trait ApplicationAggregatorTrait: Send + Sync {
    /// @ai:intent Aggregate per-file results keyed by golden path
    fn aggregate(
        &self,
        file_results: &BTreeMap<String, EvaluationResult>,
        matches: &BTreeMap<String, FileMatchResult>,
    ) -> Scores;
}

/// @ai:intent Confidence-weighted overall score, unweighted sub-scores
pub struct ApplicationAggregator;

impl ApplicationAggregator {
    /// @ai:intent Create a new aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Σ(score × confidence) / Σ confidence over evaluated files
    /// @ai:post 0.0 when nothing was evaluated or every confidence is zero
    /// @ai:effects pure
    pub fn weighted_overall_score(
        file_results: &BTreeMap<String, EvaluationResult>,
        matches: &BTreeMap<String, FileMatchResult>,
    ) -> f64 {
        let (weighted_sum, total_weight) = file_results
            .iter()
            .map(|(golden, result)| {
                let confidence = matches.get(golden).map_or(0.0, FileMatchResult::confidence);
                (result.overall_similarity() * confidence, confidence)
            })
            .fold((0.0, 0.0), |(s, w), (v, c)| (s + v, w + c));

        if total_weight > 0.0 {
            (weighted_sum / total_weight).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Default for ApplicationAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Calculate average of an iterator of f64
/// @ai:effects pure
fn average<I: Iterator<Item = f64>>(iter: I) -> f64 {
    let (sum, count) = iter.fold((0.0, 0u32), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl ApplicationAggregatorTrait for ApplicationAggregator {
    /// @ai:intent Aggregate per-file results
    /// @ai:post all-zero scores when no file was evaluated
    /// @ai:effects pure
    fn aggregate(
        &self,
        file_results: &BTreeMap<String, EvaluationResult>,
        matches: &BTreeMap<String, FileMatchResult>,
    ) -> Scores {
        if file_results.is_empty() {
            return Scores::default();
        }

        let scores = || file_results.values().map(EvaluationResult::scores);

        Scores {
            overall_similarity: Self::weighted_overall_score(file_results, matches),
            functional_equivalence: average(scores().map(|s| s.functional_equivalence)),
            structural_similarity: average(scores().map(|s| s.structural_similarity)),
            style_consistency: average(scores().map(|s| s.style_consistency)),
            complexity_delta: average(scores().map(|s| s.complexity_delta)),
            performance_impact: average(scores().map(|s| s.performance_impact)),
            maintainability_score: average(scores().map(|s| s.maintainability_score)),
            accessibility_score: average(scores().map(|s| s.accessibility_score)),
            security_score: average(scores().map(|s| s.security_score)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchStrategy;
    use serde_json::Map;

    fn result(overall: f64, style: f64) -> EvaluationResult {
        let scores = Scores {
            overall_similarity: overall,
            style_consistency: style,
            ..Scores::default()
        };
        EvaluationResult::new(scores, Map::new(), Map::new()).unwrap()
    }

    fn matched(golden: &str, confidence: f64) -> FileMatchResult {
        FileMatchResult::new(golden, format!("gen/{}", golden), confidence, MatchStrategy::Fallback, vec![])
    }

    #[test]
    fn test_average() {
        assert_eq!(average(vec![1.0, 2.0, 3.0].into_iter()), 2.0);
        assert_eq!(average(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_zero_confidence_file_contributes_nothing() {
        let mut results = BTreeMap::new();
        results.insert("a".to_string(), result(0.8, 0.4));
        results.insert("b".to_string(), result(0.2, 0.6));

        let mut matches = BTreeMap::new();
        matches.insert("a".to_string(), matched("a", 1.0));
        matches.insert("b".to_string(), matched("b", 0.0));

        let scores = ApplicationAggregator::new().aggregate(&results, &matches);

        assert!((scores.overall_similarity - 0.8).abs() < 1e-9);
        // sub-scores are plain means, not confidence-weighted
        assert!((scores.style_consistency - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_results_are_zero() {
        let scores = ApplicationAggregator::new().aggregate(&BTreeMap::new(), &BTreeMap::new());
        assert_eq!(scores, Scores::default());
    }

    #[test]
    fn test_all_zero_confidence_is_zero() {
        let mut results = BTreeMap::new();
        results.insert("a".to_string(), result(0.9, 0.0));

        let mut matches = BTreeMap::new();
        matches.insert("a".to_string(), matched("a", 0.0));

        assert_eq!(ApplicationAggregator::weighted_overall_score(&results, &matches), 0.0);
    }
}
