//! @ai:module:intent Chart generation for evaluation and batch results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator, ChartGeneratorTrait
//! @ai:module:stateless true

use crate::metrics::EvaluationResult;
use crate::runner::BatchEvaluationResult;
use anyhow::Result;
use plotters::prelude::*;
use serde_json::Value;
use std::path::Path;

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Generate charts for one evaluation, returning the file names written
    fn generate_evaluation(&self, result: &EvaluationResult, output_dir: &Path) -> Result<Vec<String>>;

    /// @ai:intent Generate charts for a batch, returning the file names written
    fn generate_batch(&self, result: &BatchEvaluationResult, output_dir: &Path) -> Result<Vec<String>>;
}

/// @ai:intent Generates bar charts with plotters
pub struct ChartGenerator;

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Draw labelled bars on a 0-100 scale
    /// @ai:pre data is non-empty
    /// @ai:effects fs:write
    fn draw_bar_chart(
        &self,
        caption: &str,
        y_desc: &str,
        data: &[(String, f64)],
        output_path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(output_path, (900, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 25))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(50)
            .build_cartesian_2d(0..data.len() as i32, 0f64..100f64)?;

        chart
            .configure_mesh()
            .x_labels(data.len())
            .y_desc(y_desc)
            .x_label_formatter(&|x| {
                data.get(*x as usize)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default()
            })
            .draw()?;

        chart.draw_series(data.iter().enumerate().map(|(i, (_, value))| {
            Rectangle::new(
                [(i as i32, 0.0), (i as i32 + 1, value * 100.0)],
                BLUE.mix(0.7).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Bar chart of the bounded score dimensions
    /// @ai:effects fs:write
    fn generate_scores_chart(&self, result: &EvaluationResult, output_path: &Path) -> Result<()> {
        let data: Vec<(String, f64)> = result
            .scores()
            .bounded_fields()
            .iter()
            .map(|(name, value)| (name.replace("_score", "").replace('_', " "), *value))
            .collect();

        self.draw_bar_chart("Score Breakdown", "Score (%)", &data, output_path)
    }

    /// @ai:intent Per-file overall scores of an application evaluation, keyed by file name
    /// @ai:effects pure
    fn file_scores(result: &EvaluationResult) -> Vec<(String, f64)> {
        let Some(Value::Object(files)) = result.detailed_analysis.get("file_results") else {
            return Vec::new();
        };

        files
            .iter()
            .filter_map(|(golden, file_result)| {
                let score = file_result.get("overall_similarity")?.as_f64()?;
                let name = Path::new(golden)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| golden.clone());
                Some((name, score))
            })
            .collect()
    }

    /// @ai:intent Bar chart of model scores in ranking order
    /// @ai:effects fs:write
    fn generate_ranking_chart(&self, result: &BatchEvaluationResult, output_path: &Path) -> Result<()> {
        let data: Vec<(String, f64)> = result
            .rankings
            .iter()
            .map(|ranked| (ranked.model.clone(), ranked.score))
            .collect();

        self.draw_bar_chart("Model Ranking", "Overall Similarity (%)", &data, output_path)
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:effects fs:write
    fn generate_evaluation(&self, result: &EvaluationResult, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        self.generate_scores_chart(result, &output_dir.join("scores.png"))?;
        let mut generated = vec!["scores.png".to_string()];

        let files = Self::file_scores(result);
        if !files.is_empty() {
            self.draw_bar_chart(
                "Per-File Similarity",
                "Overall Similarity (%)",
                &files,
                &output_dir.join("file_scores.png"),
            )?;
            generated.push("file_scores.png".to_string());
        }

        Ok(generated)
    }

    /// @ai:post no chart is drawn for a batch without scored models
    /// @ai:effects fs:write
    fn generate_batch(&self, result: &BatchEvaluationResult, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        if result.rankings.is_empty() {
            tracing::debug!("No scored models, skipping ranking chart");
            return Ok(Vec::new());
        }

        self.generate_ranking_chart(result, &output_dir.join("model_ranking.png"))?;
        Ok(vec!["model_ranking.png".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Scores;
    use crate::runner::BatchRanker;
    use serde_json::{json, Map};
    use tempfile::TempDir;

    #[test]
    fn test_generate_evaluation_chart() {
        let generator = ChartGenerator::new();
        let temp = TempDir::new().unwrap();

        let scores = Scores {
            overall_similarity: 0.7,
            security_score: 1.0,
            ..Scores::default()
        };
        let result = EvaluationResult::new(scores, Map::new(), Map::new()).unwrap();

        let files = generator.generate_evaluation(&result, temp.path()).unwrap();

        assert_eq!(files, vec!["scores.png".to_string()]);
        assert!(temp.path().join("scores.png").exists());
    }

    #[test]
    fn test_application_result_adds_file_chart() {
        let generator = ChartGenerator::new();
        let temp = TempDir::new().unwrap();

        let mut detailed = Map::new();
        detailed.insert(
            "file_results".to_string(),
            json!({
                "/g/pages/index.jsx": {"overall_similarity": 0.9},
                "/g/api/users.js": {"overall_similarity": 0.4}
            }),
        );
        let result = EvaluationResult::new(Scores::default(), detailed, Map::new()).unwrap();

        assert_eq!(
            ChartGenerator::file_scores(&result),
            vec![("users.js".to_string(), 0.4), ("index.jsx".to_string(), 0.9)]
        );

        let files = generator.generate_evaluation(&result, temp.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(temp.path().join("file_scores.png").exists());
    }

    #[test]
    fn test_generate_batch_chart() {
        let generator = ChartGenerator::new();
        let temp = TempDir::new().unwrap();

        let batch = BatchRanker::rank(
            vec![("m1".to_string(), 0.85), ("m2".to_string(), 0.75)],
            Vec::new(),
        );
        let files = generator.generate_batch(&batch, temp.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(temp.path().join("model_ranking.png").exists());
    }

    #[test]
    fn test_empty_batch_draws_nothing() {
        let generator = ChartGenerator::new();
        let temp = TempDir::new().unwrap();

        let batch = BatchRanker::rank(Vec::new(), Vec::new());
        let files = generator.generate_batch(&batch, temp.path()).unwrap();

        assert!(files.is_empty());
        assert!(!temp.path().join("model_ranking.png").exists());
    }
}
