//! @ai:module:intent Evaluate one matched file pair and discount it by match confidence
//! @ai:module:layer application
//! @ai:module:public_api PerFileEvaluator
//! @ai:module:depends_on fern_parser, evaluator::pair_scorer, evaluator::plan
//! @ai:module:stateless true

use super::pair_scorer::PairScorer;
use super::plan::EvaluationTier;
use crate::error::{EvalError, Result};
use crate::metrics::EvaluationResult;
use fern_parser::{parse_file, CodeSample};
use std::path::Path;

pub struct PerFileEvaluator {
    scorer: PairScorer,
}

impl PerFileEvaluator {
    /// @ai:effects pure
    pub fn new(scorer: PairScorer) -> Self {
        Self { scorer }
    }

    /// @ai:intent Parse both files of a pair
    /// @ai:post UnparseableFile when either side yields no content
    /// @ai:effects fs:read
    pub fn parse_pair(&self, golden: &Path, generated: &Path) -> Result<(CodeSample, CodeSample)> {
        let golden_sample = parse_file(golden)?;
        let generated_sample = parse_file(generated)?;

        match (golden_sample, generated_sample) {
            (Some(g), Some(c)) => Ok((g, c)),
            _ => Err(EvalError::UnparseableFile {
                golden: golden.to_path_buf(),
                generated: generated.to_path_buf(),
            }),
        }
    }

    /// @ai:intent Score an already parsed pair without any tier adjustment
    /// @ai:effects pure
    pub fn score_samples(&self, golden: &CodeSample, generated: &CodeSample) -> Result<EvaluationResult> {
        self.scorer.score(&golden.content, &generated.content)
    }

    /// @ai:intent Evaluate a matched pair under a tier
    /// @ai:pre confidence in [0, 1]
    /// @ai:post metadata carries match_confidence and evaluation_strategy
    /// @ai:effects fs:read
    pub fn evaluate(
        &self,
        golden: &Path,
        generated: &Path,
        tier: EvaluationTier,
        confidence: f64,
    ) -> Result<EvaluationResult> {
        let (golden_sample, generated_sample) = self.parse_pair(golden, generated)?;
        let base = self.score_samples(&golden_sample, &generated_sample)?;

        let mut result = base.with_adjusted_scores(|scores| tier.apply(scores, confidence))?;
        result.insert_metadata("match_confidence", confidence);
        result.insert_metadata("evaluation_strategy", tier.as_str());
        result.insert_metadata("golden_language", golden_sample.language_name());
        result.insert_metadata("generated_language", generated_sample.language_name());

        Ok(result)
    }
}
