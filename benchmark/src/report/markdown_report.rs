//! @ai:module:intent Markdown report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter, MarkdownReporterTrait
//! @ai:module:stateless true

use crate::metrics::EvaluationResult;
use crate::runner::BatchEvaluationResult;
use anyhow::Result;
use serde_json::Value;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Generate a Markdown report for one evaluation
    fn generate_evaluation(&self, result: &EvaluationResult, output_path: &Path) -> Result<()>;

    /// @ai:intent Generate a Markdown report for a batch of models
    fn generate_batch(&self, result: &BatchEvaluationResult, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates Markdown reports from evaluation results
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Format a unit score as a percentage
    /// @ai:effects pure
    fn format_percent(value: f64) -> String {
        format!("{:.1}%", value * 100.0)
    }

    /// @ai:intent Format a signed delta with explicit sign
    /// @ai:effects pure
    fn format_delta(value: f64) -> String {
        if value >= 0.0 {
            format!("+{:.2}", value)
        } else {
            format!("{:.2}", value)
        }
    }

    fn metadata_line(output: &mut String, result: &EvaluationResult, key: &str, label: &str) {
        if let Some(value) = result.metadata_str(key) {
            writeln!(output, "**{}:** {}", label, value).unwrap();
        }
    }

    /// @ai:intent Header with provenance metadata
    /// @ai:effects pure
    fn generate_summary(result: &EvaluationResult) -> String {
        let mut output = String::new();
        let kind = result.metadata_str("evaluation_type").unwrap_or("file");

        writeln!(output, "# Code Evaluation Report").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "**Evaluation type:** {}", kind).unwrap();

        Self::metadata_line(&mut output, result, "golden_app_path", "Golden application");
        Self::metadata_line(&mut output, result, "generated_app_path", "Generated application");
        Self::metadata_line(&mut output, result, "golden_file", "Golden file");
        Self::metadata_line(&mut output, result, "generated_file", "Generated file");
        Self::metadata_line(&mut output, result, "error", "Error");

        if let Some(Value::Bool(false)) = result.metadata.get("application_level_reliable") {
            writeln!(output).unwrap();
            writeln!(
                output,
                "> Few files matched with high confidence; treat the application score with care."
            )
            .unwrap();
        }

        writeln!(output).unwrap();
        output
    }

    /// @ai:intent Score table of all dimensions
    /// @ai:effects pure
    fn generate_scores_table(result: &EvaluationResult) -> String {
        let mut output = String::new();
        let scores = result.scores();

        writeln!(output, "## Scores").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Dimension | Score |").unwrap();
        writeln!(output, "|-----------|-------|").unwrap();

        for (name, value) in scores.bounded_fields() {
            writeln!(output, "| {} | {} |", name, Self::format_percent(value)).unwrap();
        }
        writeln!(
            output,
            "| complexity_delta | {} |",
            Self::format_delta(scores.complexity_delta)
        )
        .unwrap();

        writeln!(output).unwrap();
        output
    }

    fn join_strings(value: Option<&Value>) -> String {
        let items: Vec<&str> = value
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        if items.is_empty() {
            "none".to_string()
        } else {
            items.join(", ")
        }
    }

    /// @ai:intent Languages, functionality coverage and match statistics of an application evaluation
    /// @ai:effects pure
    fn generate_overview_section(result: &EvaluationResult) -> String {
        let mut output = String::new();

        let Some(stats) = result.detailed_analysis.get("match_statistics") else {
            return output;
        };

        writeln!(output, "## Application Overview").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "**Golden languages:** {}",
            Self::join_strings(result.detailed_analysis.get("golden_languages"))
        )
        .unwrap();
        writeln!(
            output,
            "**Generated languages:** {}",
            Self::join_strings(result.detailed_analysis.get("generated_languages"))
        )
        .unwrap();

        if let Some(coverage) = result
            .detailed_analysis
            .get("structure_analysis")
            .and_then(|s| s.get("functionality_coverage"))
        {
            let ratio = coverage
                .get("functionality_coverage")
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            writeln!(
                output,
                "**Functionality coverage:** {} (missing: {})",
                Self::format_percent(ratio),
                Self::join_strings(coverage.get("missing"))
            )
            .unwrap();
        }
        writeln!(output).unwrap();

        let count = |key: &str| stats.get(key).and_then(Value::as_u64).unwrap_or(0);
        let ratio = |key: &str| stats.get(key).and_then(Value::as_f64).unwrap_or(0.0);

        writeln!(output, "| Match statistic | Value |").unwrap();
        writeln!(output, "|-----------------|-------|").unwrap();
        writeln!(output, "| Files matched | {} |", count("total_files")).unwrap();
        writeln!(output, "| Average confidence | {:.2} |", ratio("avg_confidence")).unwrap();
        writeln!(output, "| High confidence (>= 0.8) | {} |", count("high_confidence_matches")).unwrap();
        writeln!(output, "| Medium confidence | {} |", count("medium_confidence_matches")).unwrap();
        writeln!(output, "| Low confidence (< 0.5) | {} |", count("low_confidence_matches")).unwrap();

        if let Some(Value::Object(strategies)) = stats.get("strategy_distribution") {
            for (strategy, n) in strategies {
                writeln!(output, "| Strategy {} | {} |", strategy, n).unwrap();
            }
        }

        writeln!(output).unwrap();
        output
    }

    /// @ai:intent File match table for application evaluations
    /// @ai:effects pure
    fn generate_matches_section(result: &EvaluationResult) -> String {
        let mut output = String::new();

        let Some(Value::Object(matches)) = result.detailed_analysis.get("file_matches") else {
            return output;
        };

        writeln!(output, "## File Matches").unwrap();
        writeln!(output).unwrap();

        if matches.is_empty() {
            writeln!(output, "No files could be matched.").unwrap();
            writeln!(output).unwrap();
            return output;
        }

        let plan = result.detailed_analysis.get("evaluation_plan");
        let file_results = result.detailed_analysis.get("file_results");

        writeln!(
            output,
            "| Golden | Generated | Strategy | Confidence | Tier | Score |"
        )
        .unwrap();
        writeln!(output, "|--------|-----------|----------|------------|------|-------|").unwrap();

        for (golden, m) in matches {
            let tier = plan
                .and_then(|p| p.get(golden))
                .and_then(Value::as_str)
                .unwrap_or("-");
            let score = file_results
                .and_then(|r| r.get(golden))
                .and_then(|r| r.get("overall_similarity"))
                .and_then(Value::as_f64)
                .map(Self::format_percent)
                .unwrap_or_else(|| "-".to_string());

            writeln!(
                output,
                "| {} | {} | {} | {:.2} | {} | {} |",
                golden,
                m.get("generated_file").and_then(Value::as_str).unwrap_or("-"),
                m.get("match_strategy").and_then(Value::as_str).unwrap_or("-"),
                m.get("confidence").and_then(Value::as_f64).unwrap_or(0.0),
                tier,
                score
            )
            .unwrap();
        }

        writeln!(output).unwrap();
        output
    }

    /// @ai:intent Missing and extra files from the structure analysis
    /// @ai:effects pure
    fn generate_structure_section(result: &EvaluationResult) -> String {
        let mut output = String::new();

        let Some(structure) = result.detailed_analysis.get("structure_analysis") else {
            return output;
        };

        writeln!(output, "## Structure").unwrap();
        writeln!(output).unwrap();

        if let Some(similarity) = structure.get("directory_similarity").and_then(Value::as_f64) {
            writeln!(
                output,
                "**Directory similarity:** {}",
                Self::format_percent(similarity)
            )
            .unwrap();
        }
        if let Some(status) = structure
            .get("language_compatibility")
            .and_then(|l| l.get("compatibility_status"))
            .and_then(Value::as_str)
        {
            writeln!(output, "**Language compatibility:** {}", status).unwrap();
        }

        for (key, title) in [("missing_files", "Missing files"), ("extra_files", "Extra files")] {
            let files: Vec<&str> = structure
                .get(key)
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();

            if files.is_empty() {
                continue;
            }

            writeln!(output).unwrap();
            writeln!(output, "### {}", title).unwrap();
            writeln!(output).unwrap();
            for file in files {
                writeln!(output, "- {}", file).unwrap();
            }
        }

        writeln!(output).unwrap();
        output
    }

    /// @ai:effects pure
    fn generate_recommendations_section(result: &EvaluationResult) -> String {
        let mut output = String::new();

        let recommendations: Vec<&str> = result
            .detailed_analysis
            .get("recommendations")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        if recommendations.is_empty() {
            return output;
        }

        writeln!(output, "## Recommendations").unwrap();
        writeln!(output).unwrap();
        for recommendation in recommendations {
            writeln!(output, "- {}", recommendation).unwrap();
        }
        writeln!(output).unwrap();

        output
    }

    /// @ai:intent Render a full evaluation report
    /// @ai:effects pure
    pub fn render_evaluation(result: &EvaluationResult) -> String {
        let mut content = String::new();

        content.push_str(&Self::generate_summary(result));
        content.push_str(&Self::generate_scores_table(result));
        content.push_str(&Self::generate_overview_section(result));
        content.push_str(&Self::generate_matches_section(result));
        content.push_str(&Self::generate_structure_section(result));
        content.push_str(&Self::generate_recommendations_section(result));

        content
    }

    /// @ai:intent Render a batch ranking report
    /// @ai:effects pure
    pub fn render_batch(result: &BatchEvaluationResult) -> String {
        let mut output = String::new();

        writeln!(output, "# Batch Evaluation Results").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "**Date:** {}", result.timestamp).unwrap();
        writeln!(output, "**Models evaluated:** {}", result.model_scores.len()).unwrap();
        if let Some(best) = &result.best_model {
            writeln!(output, "**Best model:** {}", best).unwrap();
        }
        if let Some(worst) = &result.worst_model {
            writeln!(output, "**Worst model:** {}", worst).unwrap();
        }
        writeln!(output).unwrap();

        writeln!(output, "## Rankings").unwrap();
        writeln!(output).unwrap();
        if result.rankings.is_empty() {
            writeln!(output, "No model could be evaluated.").unwrap();
        } else {
            writeln!(output, "| Rank | Model | Score |").unwrap();
            writeln!(output, "|------|-------|-------|").unwrap();
            for (i, ranked) in result.rankings.iter().enumerate() {
                writeln!(
                    output,
                    "| {} | {} | {} |",
                    i + 1,
                    ranked.model,
                    Self::format_percent(ranked.score)
                )
                .unwrap();
            }
        }
        writeln!(output).unwrap();

        let stats = &result.summary_statistics;
        writeln!(output, "## Summary Statistics").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Statistic | Value |").unwrap();
        writeln!(output, "|-----------|-------|").unwrap();
        writeln!(output, "| Mean | {:.3} |", stats.mean).unwrap();
        writeln!(output, "| Median | {:.3} |", stats.median).unwrap();
        writeln!(output, "| Std Dev | {:.3} |", stats.std_dev).unwrap();
        writeln!(output, "| Min | {:.3} |", stats.min).unwrap();
        writeln!(output, "| Max | {:.3} |", stats.max).unwrap();
        writeln!(output, "| Range | {:.3} |", stats.range).unwrap();
        writeln!(output).unwrap();

        if !result.excluded_models.is_empty() {
            writeln!(output, "## Excluded Models").unwrap();
            writeln!(output).unwrap();
            for model in &result.excluded_models {
                writeln!(output, "- {}", model).unwrap();
            }
            writeln!(output).unwrap();
        }

        output
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:effects fs:write
    fn generate_evaluation(&self, result: &EvaluationResult, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, Self::render_evaluation(result))?;
        Ok(())
    }

    /// @ai:effects fs:write
    fn generate_batch(&self, result: &BatchEvaluationResult, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, Self::render_batch(result))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Scores;
    use crate::runner::BatchRanker;
    use serde_json::{json, Map};
    use tempfile::TempDir;

    fn application_result() -> EvaluationResult {
        let scores = Scores {
            overall_similarity: 0.8,
            complexity_delta: -0.25,
            ..Scores::default()
        };

        let mut detailed = Map::new();
        detailed.insert(
            "file_matches".to_string(),
            json!({
                "/g/pages/index.jsx": {
                    "golden_file": "/g/pages/index.jsx",
                    "generated_file": "/c/pages/index.jsx",
                    "confidence": 1.0,
                    "match_strategy": "exact_name",
                    "similarity_reasons": ["Exact filename match"]
                }
            }),
        );
        detailed.insert(
            "evaluation_plan".to_string(),
            json!({"/g/pages/index.jsx": "direct"}),
        );
        detailed.insert(
            "structure_analysis".to_string(),
            json!({"directory_similarity": 0.5, "missing_files": ["api/users.js"], "extra_files": []}),
        );
        detailed.insert(
            "recommendations".to_string(),
            json!(["Improve file organization - 1 files from golden standard not found"]),
        );

        let mut metadata = Map::new();
        metadata.insert("evaluation_type".to_string(), json!("application"));
        metadata.insert("application_level_reliable".to_string(), json!(false));

        EvaluationResult::new(scores, detailed, metadata).unwrap()
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(MarkdownReporter::format_percent(0.125), "12.5%");
        assert_eq!(MarkdownReporter::format_delta(0.5), "+0.50");
        assert_eq!(MarkdownReporter::format_delta(-0.25), "-0.25");
    }

    #[test]
    fn test_application_report_sections() {
        let content = MarkdownReporter::render_evaluation(&application_result());

        assert!(content.contains("# Code Evaluation Report"));
        assert!(content.contains("**Evaluation type:** application"));
        assert!(content.contains("| overall_similarity | 80.0% |"));
        assert!(content.contains("| complexity_delta | -0.25 |"));
        assert!(content.contains("| /g/pages/index.jsx | /c/pages/index.jsx | exact_name | 1.00 | direct | - |"));
        assert!(content.contains("- api/users.js"));
        assert!(!content.contains("### Extra files"));
        assert!(content.contains("## Recommendations"));
        assert!(content.contains("treat the application score with care"));
    }

    #[test]
    fn test_file_report_omits_application_sections() {
        let result = EvaluationResult::zero(Map::new());
        let content = MarkdownReporter::render_evaluation(&result);

        assert!(content.contains("## Scores"));
        assert!(!content.contains("## File Matches"));
        assert!(!content.contains("## Recommendations"));
    }

    #[test]
    fn test_generate_batch_report() {
        let reporter = MarkdownReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("report.md");

        let batch = BatchRanker::rank(
            vec![("m1".to_string(), 0.85), ("m2".to_string(), 0.9)],
            vec!["m3".to_string()],
        );
        reporter.generate_batch(&batch, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("**Best model:** m2"));
        assert!(content.contains("| 1 | m2 | 90.0% |"));
        assert!(content.contains("| 2 | m1 | 85.0% |"));
        assert!(content.contains("## Excluded Models"));
        assert!(content.contains("- m3"));
    }
}
