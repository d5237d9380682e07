//! @ai:module:intent Turn match confidence into an evaluation tier and gate application-level scoring
//! @ai:module:layer domain
//! @ai:module:public_api EvaluationTier, AdaptiveEvaluationStrategy
//! @ai:module:depends_on config, matching, metrics::types
//! @ai:module:stateless true

use crate::config::PlanConfig;
use crate::matching::FileMatchResult;
use crate::metrics::Scores;
use serde::Serialize;
use std::collections::BTreeMap;

/// @ai:intent How strongly a per-file score is discounted by match uncertainty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationTier {
    Direct,
    Semantic,
    Structural,
    /// Scales both the overall and functional scores; never produced by the plan
    Functional,
    Skip,
}

impl EvaluationTier {
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationTier::Direct => "direct",
            EvaluationTier::Semantic => "semantic",
            EvaluationTier::Structural => "structural",
            EvaluationTier::Functional => "functional",
            EvaluationTier::Skip => "skip",
        }
    }

    /// @ai:intent Discount scores by match confidence
    /// @ai:pre confidence in [0, 1]
    /// @ai:post bounded fields stay in [0, 1]
    /// @ai:effects pure
    pub fn apply(&self, scores: &mut Scores, confidence: f64) {
        match self {
            EvaluationTier::Direct | EvaluationTier::Skip => {}
            EvaluationTier::Semantic => scores.overall_similarity *= confidence,
            EvaluationTier::Structural => scores.structural_similarity *= confidence,
            EvaluationTier::Functional => {
                scores.overall_similarity *= confidence;
                scores.functional_equivalence *= confidence;
            }
        }
    }
}

impl std::fmt::Display for EvaluationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @ai:intent Threshold classifier over match confidences
pub struct AdaptiveEvaluationStrategy {
    config: PlanConfig,
}

impl AdaptiveEvaluationStrategy {
    /// @ai:effects pure
    pub fn new(config: PlanConfig) -> Self {
        Self { config }
    }

    /// @ai:effects pure
    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// @ai:intent Tier for a single confidence value
    /// @ai:example (0.85) -> Direct, (0.6) -> Semantic, (0.3) -> Structural, (0.1) -> Skip
    /// @ai:effects pure
    pub fn tier_for(&self, confidence: f64) -> EvaluationTier {
        if confidence >= self.config.direct_threshold {
            EvaluationTier::Direct
        } else if confidence >= self.config.semantic_threshold {
            EvaluationTier::Semantic
        } else if confidence >= self.config.structural_threshold {
            EvaluationTier::Structural
        } else {
            EvaluationTier::Skip
        }
    }

    /// @ai:intent Map each golden path to its tier
    /// @ai:effects pure
    pub fn create_evaluation_plan(
        &self,
        matches: &BTreeMap<String, FileMatchResult>,
    ) -> BTreeMap<String, EvaluationTier> {
        matches
            .iter()
            .map(|(golden, m)| (golden.clone(), self.tier_for(m.confidence())))
            .collect()
    }

    /// @ai:intent Whether enough matches are reliable for an application-level score
    /// @ai:post false for an empty match map
    /// @ai:effects pure
    pub fn should_evaluate_as_application(&self, matches: &BTreeMap<String, FileMatchResult>) -> bool {
        if matches.is_empty() {
            return false;
        }

        let reliable = matches
            .values()
            .filter(|m| m.confidence() >= self.config.reliable_confidence)
            .count();

        reliable as f64 / matches.len() as f64 >= self.config.reliable_ratio
    }
}

impl Default for AdaptiveEvaluationStrategy {
    fn default() -> Self {
        Self::new(PlanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchStrategy;

    fn matches(confidences: &[f64]) -> BTreeMap<String, FileMatchResult> {
        confidences
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let key = format!("g{}", i);
                let generated = format!("c{}", i);
                let m = FileMatchResult::new(key.clone(), generated, *c, MatchStrategy::Fallback, vec![]);
                (key, m)
            })
            .collect()
    }

    #[test]
    fn test_tier_boundaries() {
        let strategy = AdaptiveEvaluationStrategy::default();

        assert_eq!(strategy.tier_for(1.0), EvaluationTier::Direct);
        assert_eq!(strategy.tier_for(0.8), EvaluationTier::Direct);
        assert_eq!(strategy.tier_for(0.79), EvaluationTier::Semantic);
        assert_eq!(strategy.tier_for(0.5), EvaluationTier::Semantic);
        assert_eq!(strategy.tier_for(0.3), EvaluationTier::Structural);
        assert_eq!(strategy.tier_for(0.29), EvaluationTier::Skip);
        assert_eq!(strategy.tier_for(0.1), EvaluationTier::Skip);
    }

    #[test]
    fn test_plan_keys_follow_matches() {
        let strategy = AdaptiveEvaluationStrategy::default();
        let plan = strategy.create_evaluation_plan(&matches(&[0.9, 0.1]));

        assert_eq!(plan["g0"], EvaluationTier::Direct);
        assert_eq!(plan["g1"], EvaluationTier::Skip);
    }

    #[test]
    fn test_application_gate() {
        let strategy = AdaptiveEvaluationStrategy::default();

        assert!(!strategy.should_evaluate_as_application(&BTreeMap::new()));
        // 3 of 5 reliable is exactly the required share
        assert!(strategy.should_evaluate_as_application(&matches(&[1.0, 0.9, 0.5, 0.3, 0.1])));
        assert!(!strategy.should_evaluate_as_application(&matches(&[1.0, 0.4, 0.3])));
    }

    #[test]
    fn test_tier_adjustments() {
        let base = Scores {
            overall_similarity: 0.8,
            functional_equivalence: 0.6,
            structural_similarity: 0.4,
            ..Scores::default()
        };

        let mut semantic = base;
        EvaluationTier::Semantic.apply(&mut semantic, 0.5);
        assert!((semantic.overall_similarity - 0.4).abs() < 1e-9);
        assert_eq!(semantic.structural_similarity, 0.4);

        let mut structural = base;
        EvaluationTier::Structural.apply(&mut structural, 0.5);
        assert!((structural.structural_similarity - 0.2).abs() < 1e-9);
        assert_eq!(structural.overall_similarity, 0.8);

        let mut functional = base;
        EvaluationTier::Functional.apply(&mut functional, 0.5);
        assert!((functional.overall_similarity - 0.4).abs() < 1e-9);
        assert!((functional.functional_equivalence - 0.3).abs() < 1e-9);

        let mut direct = base;
        EvaluationTier::Direct.apply(&mut direct, 0.5);
        assert_eq!(direct, base);
    }
}
