//! @ai:module:intent Score bundle types shared by per-file and application evaluation
//! @ai:module:layer domain
//! @ai:module:public_api Scores, EvaluationResult
//! @ai:module:stateless true

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// @ai:intent The nine scored dimensions of an evaluation
/// @ai:post every field except complexity_delta lies in [0, 1] once validated
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub overall_similarity: f64,
    pub functional_equivalence: f64,
    pub structural_similarity: f64,
    pub style_consistency: f64,
    /// Signed relative complexity change; negative means the generated code is simpler
    pub complexity_delta: f64,
    pub performance_impact: f64,
    pub maintainability_score: f64,
    pub accessibility_score: f64,
    pub security_score: f64,
}

impl Scores {
    /// @ai:intent Named view of the eight bounded fields
    /// @ai:effects pure
    pub fn bounded_fields(&self) -> [(&'static str, f64); 8] {
        [
            ("overall_similarity", self.overall_similarity),
            ("functional_equivalence", self.functional_equivalence),
            ("structural_similarity", self.structural_similarity),
            ("style_consistency", self.style_consistency),
            ("performance_impact", self.performance_impact),
            ("maintainability_score", self.maintainability_score),
            ("accessibility_score", self.accessibility_score),
            ("security_score", self.security_score),
        ]
    }

    /// @ai:intent Reject any bounded field outside [0, 1]
    /// @ai:effects pure
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.bounded_fields() {
            if !(0.0..=1.0).contains(&value) {
                return Err(EvalError::InvalidScore { field, value });
            }
        }

        if !self.complexity_delta.is_finite() {
            return Err(EvalError::InvalidScore {
                field: "complexity_delta",
                value: self.complexity_delta,
            });
        }

        Ok(())
    }
}

/// @ai:intent Validated score bundle for one file pair or one application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedEvaluationResult")]
pub struct EvaluationResult {
    #[serde(flatten)]
    scores: Scores,
    /// Diagnostic payload, never part of the scoring contract
    #[serde(default)]
    pub detailed_analysis: Map<String, Value>,
    /// Provenance: evaluation type, paths, languages, strategy, match confidence
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

#[derive(Deserialize)]
struct UncheckedEvaluationResult {
    #[serde(flatten)]
    scores: Scores,
    #[serde(default)]
    detailed_analysis: Map<String, Value>,
    #[serde(default)]
    metadata: Map<String, Value>,
}

impl TryFrom<UncheckedEvaluationResult> for EvaluationResult {
    type Error = EvalError;

    fn try_from(raw: UncheckedEvaluationResult) -> Result<Self> {
        Self::new(raw.scores, raw.detailed_analysis, raw.metadata)
    }
}

impl EvaluationResult {
    /// @ai:intent Build a result, failing fast on out-of-range scores
    /// @ai:pre bounded score fields in [0, 1]
    /// @ai:effects pure
    pub fn new(
        scores: Scores,
        detailed_analysis: Map<String, Value>,
        metadata: Map<String, Value>,
    ) -> Result<Self> {
        scores.validate()?;

        Ok(Self {
            scores,
            detailed_analysis,
            metadata,
        })
    }

    /// @ai:intent All-zero result carrying only metadata
    /// @ai:effects pure
    pub fn zero(metadata: Map<String, Value>) -> Self {
        Self {
            scores: Scores::default(),
            detailed_analysis: Map::new(),
            metadata,
        }
    }

    /// @ai:intent Read-only access to the validated scores
    /// @ai:effects pure
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// @ai:intent Shorthand for the primary similarity figure
    /// @ai:effects pure
    pub fn overall_similarity(&self) -> f64 {
        self.scores.overall_similarity
    }

    /// @ai:intent Derive a new result with adjusted scores, re-validating them
    /// @ai:effects pure
    pub fn with_adjusted_scores<F>(self, adjust: F) -> Result<Self>
    where
        F: FnOnce(&mut Scores),
    {
        let mut scores = self.scores;
        adjust(&mut scores);
        Self::new(scores, self.detailed_analysis, self.metadata)
    }

    /// @ai:intent Insert a metadata entry
    /// @ai:effects pure
    pub fn insert_metadata(&mut self, key: &str, value: impl Into<Value>) {
        self.metadata.insert(key.to_string(), value.into());
    }

    /// @ai:intent Metadata value as a string, if present
    /// @ai:effects pure
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_scores() -> Scores {
        Scores {
            overall_similarity: 0.8,
            functional_equivalence: 0.7,
            structural_similarity: 0.6,
            style_consistency: 0.5,
            complexity_delta: -0.4,
            performance_impact: 1.0,
            maintainability_score: 0.3,
            accessibility_score: 0.2,
            security_score: 0.0,
        }
    }

    #[test]
    fn test_new_accepts_bounded_scores() {
        let result = EvaluationResult::new(sample_scores(), Map::new(), Map::new()).unwrap();
        assert_eq!(result.scores(), &sample_scores());
    }

    #[test]
    fn test_new_rejects_out_of_range_field() {
        let scores = Scores {
            security_score: 1.01,
            ..sample_scores()
        };

        let err = EvaluationResult::new(scores, Map::new(), Map::new()).unwrap_err();
        assert!(matches!(
            err,
            EvalError::InvalidScore { field: "security_score", .. }
        ));
    }

    #[test]
    fn test_negative_score_rejected() {
        let scores = Scores {
            overall_similarity: -0.1,
            ..sample_scores()
        };
        assert!(EvaluationResult::new(scores, Map::new(), Map::new()).is_err());
    }

    #[test]
    fn test_complexity_delta_unbounded() {
        let scores = Scores {
            complexity_delta: 3.5,
            ..sample_scores()
        };
        assert!(EvaluationResult::new(scores, Map::new(), Map::new()).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "overall_similarity": 2.0, "functional_equivalence": 0.0,
            "structural_similarity": 0.0, "style_consistency": 0.0,
            "complexity_delta": 0.0, "performance_impact": 0.0,
            "maintainability_score": 0.0, "accessibility_score": 0.0,
            "security_score": 0.0
        }"#;

        assert!(serde_json::from_str::<EvaluationResult>(json).is_err());
    }

    #[test]
    fn test_adjusted_scores_revalidated() {
        let result = EvaluationResult::new(sample_scores(), Map::new(), Map::new()).unwrap();

        let halved = result
            .clone()
            .with_adjusted_scores(|s| s.overall_similarity *= 0.5)
            .unwrap();
        assert!((halved.overall_similarity() - 0.4).abs() < 1e-9);

        assert!(result
            .with_adjusted_scores(|s| s.overall_similarity = 1.5)
            .is_err());
    }
}
