//! @ai:module:intent Semantic similarity collaborator between two code strings
//! @ai:module:layer infrastructure
//! @ai:module:public_api SimilarityScorer, TokenSimilarity, MockSimilarityScorer
//! @ai:module:stateless true

use crate::error::{EvalError, Result};
use regex::Regex;
use std::collections::HashMap;

/// @ai:intent Trait for code similarity scoring
pub trait SimilarityScorer: Send + Sync {
    /// @ai:intent Similarity of two code strings in [0, 1]
    fn similarity(&self, a: &str, b: &str) -> Result<f64>;
}

/// @ai:intent Cosine similarity over identifier-token frequencies
pub struct TokenSimilarity {
    token_pattern: Regex,
}

impl TokenSimilarity {
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            token_pattern: Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap(),
        }
    }

    fn token_counts<'a>(&self, code: &'a str) -> HashMap<&'a str, f64> {
        let mut counts = HashMap::new();
        for token in self.token_pattern.find_iter(code) {
            *counts.entry(token.as_str()).or_insert(0.0) += 1.0;
        }
        counts
    }
}

impl Default for TokenSimilarity {
    fn default() -> Self {
        Self::new()
    }
}

impl SimilarityScorer for TokenSimilarity {
    /// @ai:post 1.0 when both sides have no tokens, 0.0 when exactly one side has none
    /// @ai:effects pure
    fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        let left = self.token_counts(a);
        let right = self.token_counts(b);

        match (left.is_empty(), right.is_empty()) {
            (true, true) => return Ok(1.0),
            (true, false) | (false, true) => return Ok(0.0),
            _ => {}
        }

        let dot: f64 = left
            .iter()
            .filter_map(|(token, x)| right.get(token).map(|y| x * y))
            .sum();
        let norm = |counts: &HashMap<&str, f64>| counts.values().map(|v| v * v).sum::<f64>().sqrt();

        Ok((dot / (norm(&left) * norm(&right))).clamp(0.0, 1.0))
    }
}

/// @ai:intent Mock scorer for testing
pub struct MockSimilarityScorer {
    value: Option<f64>,
}

impl MockSimilarityScorer {
    /// @ai:intent Create a mock scorer returning a fixed value
    pub fn new(value: f64) -> Self {
        Self { value: Some(value) }
    }

    /// @ai:intent Create a mock scorer that always fails
    pub fn failing() -> Self {
        Self { value: None }
    }
}

impl SimilarityScorer for MockSimilarityScorer {
    fn similarity(&self, _a: &str, _b: &str) -> Result<f64> {
        self.value.ok_or_else(|| EvalError::Collaborator {
            name: "similarity",
            message: "mock failure".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_code_is_one() {
        let scorer = TokenSimilarity::new();
        let code = "def add(a, b):\n    return a + b";
        assert!((scorer.similarity(code, code).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_tokens_are_zero() {
        let scorer = TokenSimilarity::new();
        assert_eq!(scorer.similarity("alpha beta", "gamma delta").unwrap(), 0.0);
    }

    #[test]
    fn test_empty_inputs() {
        let scorer = TokenSimilarity::new();
        assert_eq!(scorer.similarity("", "  ").unwrap(), 1.0);
        assert_eq!(scorer.similarity("", "x").unwrap(), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let scorer = TokenSimilarity::new();
        // vectors (1,1,0) and (1,0,1)
        let s = scorer.similarity("a b", "a c").unwrap();
        assert!((s - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_mock_failure() {
        assert!(MockSimilarityScorer::failing().similarity("a", "b").is_err());
        assert_eq!(MockSimilarityScorer::new(0.7).similarity("a", "b").unwrap(), 0.7);
    }
}
