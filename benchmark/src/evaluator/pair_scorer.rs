//! @ai:module:intent Score one golden/generated code pair using the similarity and quality collaborators
//! @ai:module:layer application
//! @ai:module:public_api PairScorer
//! @ai:module:depends_on evaluator::similarity, evaluator::quality, config, metrics::types
//! @ai:module:stateless true

use super::quality::{QualityScorer, QualityScores};
use super::similarity::SimilarityScorer;
use crate::config::ScoreWeights;
use crate::error::Result;
use crate::metrics::{EvaluationResult, Scores};
use serde_json::{json, Map, Value};
use std::sync::Arc;

const SIMILARITY_FALLBACK: f64 = 0.5;

/// @ai:intent Combines collaborator output into a validated EvaluationResult
pub struct PairScorer {
    similarity: Arc<dyn SimilarityScorer>,
    quality: Arc<dyn QualityScorer>,
    weights: ScoreWeights,
}

impl PairScorer {
    /// @ai:intent Create a scorer; weights not summing to 1.0 are normalized with a warning
    /// @ai:effects pure
    pub fn new(
        similarity: Arc<dyn SimilarityScorer>,
        quality: Arc<dyn QualityScorer>,
        weights: ScoreWeights,
    ) -> Self {
        let normalized = weights.normalized();
        if normalized != weights {
            tracing::warn!(
                "Score weights sum to {:.3}, normalizing to 1.0",
                weights.total()
            );
        }

        Self {
            similarity,
            quality,
            weights: normalized,
        }
    }

    /// @ai:intent Score a code pair
    /// @ai:post collaborator failures fall back to neutral values and are listed in collaborator_fallbacks
    /// @ai:effects pure
    pub fn score(&self, golden: &str, generated: &str) -> Result<EvaluationResult> {
        let mut fallbacks: Vec<Value> = Vec::new();

        let semantic = match self.similarity.similarity(golden, generated) {
            Ok(value) if value.is_finite() => value.clamp(0.0, 1.0),
            Ok(value) => {
                tracing::warn!("Similarity collaborator returned {}, using fallback", value);
                fallbacks.push(json!("similarity"));
                SIMILARITY_FALLBACK
            }
            Err(e) => {
                tracing::warn!("Similarity collaborator failed: {}", e);
                fallbacks.push(json!("similarity"));
                SIMILARITY_FALLBACK
            }
        };

        let quality = match self.quality.quality_scores(golden, generated) {
            Ok(q) => q,
            Err(e) => {
                tracing::warn!("Quality collaborator failed: {}", e);
                fallbacks.push(json!("quality"));
                QualityScores::neutral()
            }
        };

        let w = &self.weights;
        let overall = w.semantic * semantic
            + w.functional * quality.functional_equivalence
            + w.structural * quality.structural_similarity
            + w.style * quality.style_consistency
            + w.maintainability * quality.maintainability_score
            + w.accessibility * quality.accessibility_score;

        let scores = Scores {
            overall_similarity: clamp_score(overall),
            functional_equivalence: clamp_score(quality.functional_equivalence),
            structural_similarity: clamp_score(quality.structural_similarity),
            style_consistency: clamp_score(quality.style_consistency),
            complexity_delta: if quality.complexity_delta.is_finite() {
                quality.complexity_delta
            } else {
                0.0
            },
            performance_impact: clamp_score(quality.performance_impact),
            maintainability_score: clamp_score(quality.maintainability_score),
            accessibility_score: clamp_score(quality.accessibility_score),
            security_score: clamp_score(quality.security_score),
        };

        let mut detailed = Map::new();
        detailed.insert("semantic_similarity".to_string(), json!(semantic));
        detailed.insert(
            "code_length_ratio".to_string(),
            json!(ratio(generated.len(), golden.len())),
        );
        detailed.insert(
            "line_count_ratio".to_string(),
            json!(ratio(
                generated.split('\n').count(),
                golden.split('\n').count()
            )),
        );
        detailed.insert("weights_used".to_string(), serde_json::to_value(self.weights)?);
        detailed.insert("collaborator_fallbacks".to_string(), Value::Array(fallbacks));

        EvaluationResult::new(scores, detailed, Map::new())
    }
}

/// @ai:effects pure
fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// @ai:intent Size ratio; 1.0 when the denominator is zero
/// @ai:effects pure
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        1.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::quality::{HeuristicQualityAnalyzer, MockQualityScorer};
    use crate::evaluator::similarity::{MockSimilarityScorer, TokenSimilarity};

    fn uniform_quality(value: f64) -> QualityScores {
        QualityScores {
            functional_equivalence: value,
            structural_similarity: value,
            style_consistency: value,
            complexity_delta: 0.0,
            performance_impact: value,
            maintainability_score: value,
            accessibility_score: value,
            security_score: value,
        }
    }

    #[test]
    fn test_weighted_overall() {
        let scorer = PairScorer::new(
            Arc::new(MockSimilarityScorer::new(1.0)),
            Arc::new(MockQualityScorer::new(uniform_quality(0.0))),
            ScoreWeights::default(),
        );

        let result = scorer.score("a", "b").unwrap();
        assert!((result.overall_similarity() - 0.80).abs() < 1e-9);
    }

    #[test]
    fn test_collaborator_failures_fall_back() {
        let scorer = PairScorer::new(
            Arc::new(MockSimilarityScorer::failing()),
            Arc::new(MockQualityScorer::failing()),
            ScoreWeights::default(),
        );

        let result = scorer.score("a", "b").unwrap();
        assert!((result.overall_similarity() - 0.5).abs() < 1e-9);
        assert_eq!(result.scores().complexity_delta, 0.0);
        assert_eq!(
            result.detailed_analysis["collaborator_fallbacks"],
            json!(["similarity", "quality"])
        );
    }

    #[test]
    fn test_unnormalized_weights_are_rescaled() {
        let weights = ScoreWeights {
            semantic: 2.0,
            functional: 2.0,
            structural: 0.0,
            style: 0.0,
            maintainability: 0.0,
            accessibility: 0.0,
        };
        let scorer = PairScorer::new(
            Arc::new(MockSimilarityScorer::new(1.0)),
            Arc::new(MockQualityScorer::new(uniform_quality(0.0))),
            weights,
        );

        let result = scorer.score("a", "b").unwrap();
        assert!((result.overall_similarity() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_default_collaborators_on_identical_code() {
        let scorer = PairScorer::new(
            Arc::new(TokenSimilarity::new()),
            Arc::new(HeuristicQualityAnalyzer::new()),
            ScoreWeights::default(),
        );

        let code = "def total(items):\n    return sum(items)\n";
        let result = scorer.score(code, code).unwrap();

        assert!(result.overall_similarity() > 0.9);
        assert_eq!(result.detailed_analysis["code_length_ratio"], json!(1.0));
    }
}
