//! @ai:module:intent Evaluate several model outputs against one golden standard
//! @ai:module:layer application
//! @ai:module:public_api ModelOutput
//! @ai:module:depends_on evaluator, runner::ranking

use super::ranking::{BatchEvaluationResult, BatchRanker};
use crate::error::{EvalError, Result};
use crate::evaluator::{EvaluationMode, Evaluator};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// @ai:intent A named model output to compare against the golden standard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOutput {
    pub name: String,
    pub path: PathBuf,
}

impl ModelOutput {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl FromStr for ModelOutput {
    type Err = EvalError;

    /// @ai:example ("gpt=out/gpt") -> ModelOutput { name: "gpt", path: "out/gpt" }
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
                Ok(Self::new(name.trim(), path.trim()))
            }
            _ => Err(EvalError::Config(format!(
                "Invalid model output '{}', expected name=path",
                s
            ))),
        }
    }
}

/// @ai:intent Drop repeated model names, keeping the first occurrence
/// @ai:effects pure
fn unique_outputs(outputs: &[ModelOutput]) -> Vec<&ModelOutput> {
    let mut seen: HashSet<String> = HashSet::new();

    outputs
        .iter()
        .filter(|output| {
            let first = seen.insert(output.name.clone());
            if !first {
                tracing::warn!("Duplicate model name '{}', keeping the first entry", output.name);
            }
            first
        })
        .collect()
}

/// @ai:intent Collects per-model outcomes in input order
#[derive(Default)]
struct BatchOutcome {
    scores: Vec<(String, f64)>,
    excluded: Vec<String>,
}

impl BatchOutcome {
    fn record(&mut self, name: &str, outcome: Result<f64>) {
        match outcome {
            Ok(score) => {
                tracing::info!("Model {} scored {:.3}", name, score);
                self.scores.push((name.to_string(), score));
            }
            Err(e) => {
                tracing::warn!("Excluding model {} from the batch: {}", name, e);
                self.excluded.push(name.to_string());
            }
        }
    }

    fn finish(self) -> BatchEvaluationResult {
        BatchRanker::rank(self.scores, self.excluded)
    }
}

impl Evaluator {
    /// @ai:intent Evaluate every model output in order and rank the results
    /// @ai:post failing models are excluded, never scored as zero
    /// @ai:effects fs:read
    pub fn evaluate_batch(
        &self,
        golden: &Path,
        outputs: &[ModelOutput],
        mode: EvaluationMode,
    ) -> BatchEvaluationResult {
        tracing::info!("Starting batch evaluation of {} models", outputs.len());
        let mut outcome = BatchOutcome::default();

        for output in unique_outputs(outputs) {
            let score = self
                .evaluate(golden, &output.path, mode)
                .map(|result| result.overall_similarity());
            outcome.record(&output.name, score);
        }

        outcome.finish()
    }

    /// @ai:intent Evaluate model outputs on the blocking pool, one task per model
    /// @ai:post identical result to evaluate_batch; ordering follows the input
    /// @ai:effects fs:read
    pub async fn evaluate_batch_concurrent(
        self: &Arc<Self>,
        golden: &Path,
        outputs: &[ModelOutput],
        mode: EvaluationMode,
    ) -> BatchEvaluationResult {
        tracing::info!(
            "Starting concurrent batch evaluation of {} models",
            outputs.len()
        );

        let handles: Vec<_> = unique_outputs(outputs)
            .into_iter()
            .map(|output| {
                let evaluator = Arc::clone(self);
                let golden = golden.to_path_buf();
                let path = output.path.clone();

                let handle = tokio::task::spawn_blocking(move || {
                    evaluator
                        .evaluate(&golden, &path, mode)
                        .map(|result| result.overall_similarity())
                });
                (output.name.clone(), handle)
            })
            .collect();

        let mut outcome = BatchOutcome::default();

        for (name, handle) in handles {
            let score = match handle.await {
                Ok(score) => score,
                Err(e) => Err(EvalError::Collaborator {
                    name: "batch_worker",
                    message: e.to_string(),
                }),
            };
            outcome.record(&name, score);
        }

        outcome.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, name: &str, content: &str) -> PathBuf {
        let path = root.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn fixture() -> (TempDir, PathBuf, Vec<ModelOutput>) {
        let temp = TempDir::new().unwrap();
        let golden = write(
            temp.path(),
            "golden.py",
            "def add(a, b):\n    return a + b\n",
        );
        let same = write(temp.path(), "same.py", "def add(a, b):\n    return a + b\n");
        let other = write(
            temp.path(),
            "other.py",
            "class Store:\n    def load(self):\n        return {}\n",
        );
        let broken = write(temp.path(), "broken.png", "binary");

        let outputs = vec![
            ModelOutput::new("same", same),
            ModelOutput::new("broken", broken),
            ModelOutput::new("other", other),
        ];
        (temp, golden, outputs)
    }

    #[test]
    fn test_parse_model_output() {
        let output: ModelOutput = "gpt=out/gpt".parse().unwrap();
        assert_eq!(output, ModelOutput::new("gpt", "out/gpt"));
        assert!("no-separator".parse::<ModelOutput>().is_err());
        assert!("=path".parse::<ModelOutput>().is_err());
    }

    #[test]
    fn test_failing_model_is_excluded_not_zeroed() {
        let (_temp, golden, outputs) = fixture();

        let result = Evaluator::default().evaluate_batch(&golden, &outputs, EvaluationMode::Auto);

        assert_eq!(result.model_scores.len(), 2);
        assert!(!result.model_scores.contains_key("broken"));
        assert_eq!(result.excluded_models, vec!["broken".to_string()]);
        assert_eq!(result.best_model.as_deref(), Some("same"));
        assert_eq!(result.worst_model.as_deref(), Some("other"));
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let (_temp, golden, mut outputs) = fixture();
        outputs.push(ModelOutput::new("same", golden.with_file_name("other.py")));

        let result = Evaluator::default().evaluate_batch(&golden, &outputs, EvaluationMode::File);

        assert_eq!(result.rankings.len(), 2);
        assert_eq!(result.best_model.as_deref(), Some("same"));
        assert!(result.model_scores["same"] > 0.9);
    }

    #[test]
    fn test_empty_batch() {
        let (_temp, golden, _) = fixture();
        let result = Evaluator::default().evaluate_batch(&golden, &[], EvaluationMode::Auto);

        assert!(result.model_scores.is_empty());
        assert_eq!(result.best_model, None);
        assert_eq!(result.summary_statistics.mean, 0.0);
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let (_temp, golden, outputs) = fixture();
        let evaluator = Arc::new(Evaluator::default());

        let sequential = evaluator.evaluate_batch(&golden, &outputs, EvaluationMode::Auto);
        let concurrent = evaluator
            .evaluate_batch_concurrent(&golden, &outputs, EvaluationMode::Auto)
            .await;

        assert_eq!(concurrent.model_scores, sequential.model_scores);
        assert_eq!(concurrent.rankings, sequential.rankings);
        assert_eq!(concurrent.excluded_models, sequential.excluded_models);
    }
}
