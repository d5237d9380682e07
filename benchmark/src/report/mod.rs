//! @ai:module:intent Report generation for evaluation and batch results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, JsonReporter, MarkdownReporter, ChartGenerator, SavedResults

pub mod charts;
pub mod json_report;
pub mod markdown_report;

pub use charts::{ChartGenerator, ChartGeneratorTrait};
pub use json_report::{JsonReporter, JsonReporterTrait, SavedResults};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};

use crate::metrics::EvaluationResult;
use crate::runner::BatchEvaluationResult;
use anyhow::Result;
use std::path::Path;

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
    charts: Option<ChartGenerator>,
}

impl ReportGenerator {
    /// @ai:intent Create a report generator that also draws charts
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::with_charts(true)
    }

    /// @ai:effects pure
    pub fn with_charts(charts: bool) -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
            charts: charts.then(ChartGenerator::new),
        }
    }

    /// @ai:intent Write result.json, report.md and charts for one evaluation
    /// @ai:effects fs:write
    pub fn generate_evaluation(&self, result: &EvaluationResult, output_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(output_dir)?;

        self.json
            .generate_evaluation(result, &output_dir.join("result.json"))?;
        self.markdown
            .generate_evaluation(result, &output_dir.join("report.md"))?;
        if let Some(charts) = &self.charts {
            charts.generate_evaluation(result, output_dir)?;
        }

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(())
    }

    /// @ai:intent Write batch.json, report.md and the ranking chart
    /// @ai:effects fs:write
    pub fn generate_batch(&self, result: &BatchEvaluationResult, output_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(output_dir)?;

        self.json.generate_batch(result, &output_dir.join("batch.json"))?;
        self.markdown
            .generate_batch(result, &output_dir.join("report.md"))?;
        if let Some(charts) = &self.charts {
            charts.generate_batch(result, output_dir)?;
        }

        tracing::info!("Batch reports generated in {}", output_dir.display());
        Ok(())
    }

    /// @ai:intent Regenerate reports from a previously saved JSON result
    /// @ai:effects fs:read, fs:write
    pub fn regenerate(&self, results_path: &Path, output_dir: &Path) -> Result<()> {
        match self.json.load(results_path)? {
            SavedResults::Batch(batch) => self.generate_batch(&batch, output_dir),
            SavedResults::Evaluation(result) => self.generate_evaluation(&result, output_dir),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::BatchRanker;
    use serde_json::Map;
    use tempfile::TempDir;

    #[test]
    fn test_generate_evaluation_without_charts() {
        let temp = TempDir::new().unwrap();
        let result = EvaluationResult::zero(Map::new());

        ReportGenerator::with_charts(false)
            .generate_evaluation(&result, temp.path())
            .unwrap();

        assert!(temp.path().join("result.json").exists());
        assert!(temp.path().join("report.md").exists());
        assert!(!temp.path().join("scores.png").exists());
    }

    #[test]
    fn test_regenerate_batch_report() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("saved");
        let target = temp.path().join("again");

        let generator = ReportGenerator::with_charts(false);
        let batch = BatchRanker::rank(vec![("m1".to_string(), 0.6)], Vec::new());
        generator.generate_batch(&batch, &source).unwrap();

        generator
            .regenerate(&source.join("batch.json"), &target)
            .unwrap();

        let content = std::fs::read_to_string(target.join("report.md")).unwrap();
        assert!(content.contains("| 1 | m1 | 60.0% |"));
    }
}
