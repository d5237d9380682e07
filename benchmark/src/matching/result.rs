//! @ai:module:intent Pairing records produced by the matching passes
//! @ai:module:layer domain
//! @ai:module:public_api MatchStrategy, FileMatchResult
//! @ai:module:stateless true

use serde::Serialize;

/// @ai:intent Which pass produced a pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    ExactName,
    ComponentSignature,
    Functionality,
    ContentSimilarity,
    Fallback,
}

impl MatchStrategy {
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::ExactName => "exact_name",
            MatchStrategy::ComponentSignature => "component_signature",
            MatchStrategy::Functionality => "functionality",
            MatchStrategy::ContentSimilarity => "content_similarity",
            MatchStrategy::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @ai:intent One golden file paired with one generated file
/// @ai:post confidence lies in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMatchResult {
    pub golden_file: String,
    pub generated_file: String,
    confidence: f64,
    pub match_strategy: MatchStrategy,
    pub similarity_reasons: Vec<String>,
}

impl FileMatchResult {
    /// @ai:intent Build a match, clamping confidence into [0, 1]
    /// @ai:effects pure
    pub fn new(
        golden_file: impl Into<String>,
        generated_file: impl Into<String>,
        confidence: f64,
        match_strategy: MatchStrategy,
        similarity_reasons: Vec<String>,
    ) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };

        Self {
            golden_file: golden_file.into(),
            generated_file: generated_file.into(),
            confidence,
            match_strategy,
            similarity_reasons,
        }
    }

    /// @ai:effects pure
    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_clamped() {
        let high = FileMatchResult::new("a", "b", 1.4, MatchStrategy::ContentSimilarity, vec![]);
        let nan = FileMatchResult::new("a", "b", f64::NAN, MatchStrategy::Fallback, vec![]);

        assert_eq!(high.confidence(), 1.0);
        assert_eq!(nan.confidence(), 0.0);
    }

    #[test]
    fn test_strategy_serializes_snake_case() {
        let json = serde_json::to_string(&MatchStrategy::ComponentSignature).unwrap();
        assert_eq!(json, "\"component_signature\"");
    }
}
