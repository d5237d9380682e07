//! @ai:module:intent JSON persistence of evaluation and batch results
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter, JsonReporterTrait, SavedResults
//! @ai:module:stateless true

use crate::metrics::EvaluationResult;
use crate::runner::BatchEvaluationResult;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Either kind of result file written by the reporter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SavedResults {
    Batch(BatchEvaluationResult),
    Evaluation(EvaluationResult),
}

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Write a single evaluation result
    fn generate_evaluation(&self, result: &EvaluationResult, output_path: &Path) -> Result<()>;

    /// @ai:intent Write a batch result
    fn generate_batch(&self, result: &BatchEvaluationResult, output_path: &Path) -> Result<()>;

    /// @ai:intent Read back a result file of either kind
    fn load(&self, path: &Path) -> Result<SavedResults>;
}

/// @ai:intent Generates pretty-printed JSON reports
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    fn write<T: Serialize>(value: &T, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:effects fs:write
    fn generate_evaluation(&self, result: &EvaluationResult, output_path: &Path) -> Result<()> {
        Self::write(result, output_path)
    }

    /// @ai:effects fs:write
    fn generate_batch(&self, result: &BatchEvaluationResult, output_path: &Path) -> Result<()> {
        Self::write(result, output_path)
    }

    /// @ai:effects fs:read
    fn load(&self, path: &Path) -> Result<SavedResults> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read results: {}", path.display()))?;
        let results = serde_json::from_str(&content)
            .with_context(|| format!("Not an evaluation or batch result: {}", path.display()))?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Scores;
    use crate::runner::BatchRanker;
    use serde_json::Map;
    use tempfile::TempDir;

    #[test]
    fn test_evaluation_report_loads_back() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("result.json");

        let scores = Scores {
            overall_similarity: 0.75,
            ..Scores::default()
        };
        let result = EvaluationResult::new(scores, Map::new(), Map::new()).unwrap();

        reporter.generate_evaluation(&result, &output).unwrap();
        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("\"overall_similarity\": 0.75"));

        match reporter.load(&output).unwrap() {
            SavedResults::Evaluation(loaded) => assert_eq!(loaded.overall_similarity(), 0.75),
            SavedResults::Batch(_) => panic!("expected an evaluation result"),
        }
    }

    #[test]
    fn test_batch_report_loads_back() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("batch.json");

        let batch = BatchRanker::rank(vec![("a".to_string(), 0.5)], vec!["b".to_string()]);
        reporter.generate_batch(&batch, &output).unwrap();

        match reporter.load(&output).unwrap() {
            SavedResults::Batch(loaded) => {
                assert_eq!(loaded.best_model.as_deref(), Some("a"));
                assert_eq!(loaded.excluded_models, vec!["b".to_string()]);
            }
            SavedResults::Evaluation(_) => panic!("expected a batch result"),
        }
    }

    #[test]
    fn test_load_rejects_unrelated_json() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("other.json");
        std::fs::write(&path, r#"{"hello": "world"}"#).unwrap();

        assert!(reporter.load(&path).is_err());
    }
}
