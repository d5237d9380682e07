//! @ai:module:intent Single evaluation entry point for files and whole applications
//! @ai:module:layer application
//! @ai:module:public_api Evaluator, EvaluationMode, EvaluationTier, AdaptiveEvaluationStrategy, PerFileEvaluator, PairScorer, SimilarityScorer, QualityScorer
//! @ai:module:depends_on fern_parser, matching, metrics, config

pub mod pair_scorer;
pub mod per_file;
pub mod plan;
pub mod quality;
pub mod similarity;

pub use pair_scorer::PairScorer;
pub use per_file::PerFileEvaluator;
pub use plan::{AdaptiveEvaluationStrategy, EvaluationTier};
pub use quality::{HeuristicQualityAnalyzer, MockQualityScorer, QualityScorer, QualityScores};
pub use similarity::{MockSimilarityScorer, SimilarityScorer, TokenSimilarity};

use crate::config::EvalConfig;
use crate::error::{EvalError, Result};
use crate::matching::{FileAnalyzer, FileMatchResult, FileMatcher, MatchStatistics};
use crate::metrics::{
    analyze_structure, generate_recommendations, ApplicationAggregator, ApplicationAggregatorTrait,
    EvaluationResult,
};
use fern_parser::{is_supported_file, parse_application};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use walkdir::WalkDir;

/// Entry points tried, in order, when a directory is handed to file evaluation.
const MAIN_FILE_CANDIDATES: [&str; 7] = [
    "main.py", "index.js", "index.ts", "index.tsx", "app.py", "app.js", "app.ts",
];

/// @ai:intent How a golden/generated pair should be evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    File,
    App,
    /// Two directories are evaluated as applications, anything else as files
    Auto,
}

impl EvaluationMode {
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationMode::File => "file",
            EvaluationMode::App => "app",
            EvaluationMode::Auto => "auto",
        }
    }
}

impl FromStr for EvaluationMode {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(EvaluationMode::File),
            "app" | "application" => Ok(EvaluationMode::App),
            "auto" => Ok(EvaluationMode::Auto),
            other => Err(EvalError::InvalidMode(other.to_string())),
        }
    }
}

impl std::fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @ai:intent Drives analysis, matching, planning, per-file scoring and aggregation
pub struct Evaluator {
    analyzer: FileAnalyzer,
    matcher: FileMatcher,
    strategy: AdaptiveEvaluationStrategy,
    per_file: PerFileEvaluator,
    aggregator: ApplicationAggregator,
}

impl Evaluator {
    /// @ai:intent Create an evaluator with the default collaborators
    /// @ai:effects pure
    pub fn new(config: &EvalConfig) -> Self {
        Self::with_collaborators(
            config,
            Arc::new(TokenSimilarity::new()),
            Arc::new(HeuristicQualityAnalyzer::new()),
        )
    }

    /// @ai:intent Create an evaluator with custom similarity and quality collaborators
    /// @ai:effects pure
    pub fn with_collaborators(
        config: &EvalConfig,
        similarity: Arc<dyn SimilarityScorer>,
        quality: Arc<dyn QualityScorer>,
    ) -> Self {
        Self {
            analyzer: FileAnalyzer::new(),
            matcher: FileMatcher::new(&config.matching),
            strategy: AdaptiveEvaluationStrategy::new(config.plan),
            per_file: PerFileEvaluator::new(PairScorer::new(similarity, quality, config.weights)),
            aggregator: ApplicationAggregator::new(),
        }
    }

    /// @ai:intent Evaluate a golden/generated pair
    /// @ai:post a missing input in file mode yields an all-zero result carrying the error
    /// @ai:effects fs:read
    pub fn evaluate(&self, golden: &Path, generated: &Path, mode: EvaluationMode) -> Result<EvaluationResult> {
        match Self::resolve_mode(golden, generated, mode) {
            EvaluationMode::App => self.evaluate_applications(golden, generated),
            _ => match self.evaluate_files(golden, generated) {
                Err(e) if e.is_not_found() => {
                    tracing::warn!("File evaluation input missing: {}", e);

                    let mut metadata = Map::new();
                    metadata.insert("evaluation_type".to_string(), json!("file"));
                    metadata.insert("error".to_string(), json!(e.to_string()));
                    Ok(EvaluationResult::zero(metadata))
                }
                other => other,
            },
        }
    }

    /// @ai:intent Decide the concrete mode for an auto request
    /// @ai:effects fs:read
    fn resolve_mode(golden: &Path, generated: &Path, mode: EvaluationMode) -> EvaluationMode {
        if mode != EvaluationMode::Auto {
            return mode;
        }

        match (golden.is_dir(), generated.is_dir()) {
            (true, true) => EvaluationMode::App,
            (false, false) => EvaluationMode::File,
            _ => {
                tracing::warn!(
                    "Mixed file and directory inputs ({}, {}), evaluating as files",
                    golden.display(),
                    generated.display()
                );
                EvaluationMode::File
            }
        }
    }

    /// @ai:intent Evaluate two single files; directories resolve to their main file
    /// @ai:effects fs:read
    pub fn evaluate_files(&self, golden: &Path, generated: &Path) -> Result<EvaluationResult> {
        let golden_file = resolve_file_path(golden)?;
        let generated_file = resolve_file_path(generated)?;

        tracing::info!(
            "Evaluating file {} against {}",
            generated_file.display(),
            golden_file.display()
        );

        let (golden_sample, generated_sample) =
            self.per_file.parse_pair(&golden_file, &generated_file)?;
        let mut result = self.per_file.score_samples(&golden_sample, &generated_sample)?;

        result.insert_metadata("evaluation_type", "file");
        result.insert_metadata("golden_file", golden_file.to_string_lossy().into_owned());
        result.insert_metadata("generated_file", generated_file.to_string_lossy().into_owned());
        result.insert_metadata("golden_language", golden_sample.language_name());
        result.insert_metadata("generated_language", generated_sample.language_name());

        Ok(result)
    }

    /// @ai:intent Evaluate two application directories
    /// @ai:post overall score is the confidence-weighted mean over evaluated files, 0.0 when none
    /// @ai:effects fs:read
    pub fn evaluate_applications(&self, golden: &Path, generated: &Path) -> Result<EvaluationResult> {
        let golden_structure = parse_application(golden)?;
        let generated_structure = parse_application(generated)?;

        tracing::info!(
            "Parsed applications: {} golden files, {} generated files",
            golden_structure.total_files(),
            generated_structure.total_files()
        );

        let golden_analyses = self.analyzer.analyze_application(&golden_structure);
        let generated_analyses = self.analyzer.analyze_application(&generated_structure);

        let matches = self.matcher.match_files(&golden_analyses, &generated_analyses);
        let plan = self.strategy.create_evaluation_plan(&matches);

        let reliable = self.strategy.should_evaluate_as_application(&matches);
        if !reliable {
            tracing::warn!("Too few confident file matches, application-level score may be unreliable");
        }

        let file_results = self.evaluate_matched_files(&matches, &plan);
        tracing::info!("Evaluated {} of {} matched files", file_results.len(), matches.len());

        let structure = analyze_structure(&golden_structure, &generated_structure, &matches);
        let scores = self.aggregator.aggregate(&file_results, &matches);

        let mut recommendations = generate_recommendations(&file_results, &structure, &matches);
        if !reliable {
            let config = self.strategy.config();
            recommendations.push(format!(
                "Application-level score may be unreliable - fewer than {:.0}% of files matched with confidence of at least {:.1}",
                config.reliable_ratio * 100.0,
                config.reliable_confidence
            ));
        }

        let mut detailed = Map::new();
        detailed.insert("file_matches".to_string(), serde_json::to_value(&matches)?);
        detailed.insert("evaluation_plan".to_string(), serde_json::to_value(&plan)?);
        detailed.insert("file_results".to_string(), serde_json::to_value(&file_results)?);
        detailed.insert("structure_analysis".to_string(), serde_json::to_value(&structure)?);
        detailed.insert(
            "match_statistics".to_string(),
            serde_json::to_value(MatchStatistics::from_matches(&matches))?,
        );
        detailed.insert("recommendations".to_string(), json!(recommendations));
        detailed.insert(
            "golden_languages".to_string(),
            json!(golden_structure.detected_languages()),
        );
        detailed.insert(
            "generated_languages".to_string(),
            json!(generated_structure.detected_languages()),
        );
        detailed.insert(
            "detected_frameworks".to_string(),
            json!({
                "golden": golden_structure.detected_frameworks,
                "generated": generated_structure.detected_frameworks,
            }),
        );

        let mut metadata = Map::new();
        metadata.insert("evaluation_type".to_string(), json!("application"));
        metadata.insert("golden_app_path".to_string(), json!(golden.to_string_lossy()));
        metadata.insert("generated_app_path".to_string(), json!(generated.to_string_lossy()));
        metadata.insert("total_files_matched".to_string(), json!(matches.len()));
        metadata.insert("overall_score".to_string(), json!(scores.overall_similarity));
        metadata.insert("application_level_reliable".to_string(), Value::Bool(reliable));

        EvaluationResult::new(scores, detailed, metadata)
    }

    /// @ai:intent Score every planned pair, leaving out skipped and failed files
    /// @ai:effects fs:read
    fn evaluate_matched_files(
        &self,
        matches: &BTreeMap<String, FileMatchResult>,
        plan: &BTreeMap<String, EvaluationTier>,
    ) -> BTreeMap<String, EvaluationResult> {
        let mut results = BTreeMap::new();

        for (golden, m) in matches {
            let tier = plan.get(golden).copied().unwrap_or(EvaluationTier::Skip);

            if tier == EvaluationTier::Skip {
                tracing::debug!(
                    "Skipping {} (confidence {:.2})",
                    golden,
                    m.confidence()
                );
                continue;
            }

            let outcome = self.per_file.evaluate(
                Path::new(&m.golden_file),
                Path::new(&m.generated_file),
                tier,
                m.confidence(),
            );

            match outcome {
                Ok(result) => {
                    results.insert(golden.clone(), result);
                }
                Err(e) => {
                    tracing::warn!("Failed to evaluate {} -> {}: {}", golden, m.generated_file, e);
                }
            }
        }

        results
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(&EvalConfig::default())
    }
}

/// @ai:intent Resolve a directory to its main source file
/// @ai:post non-directories are returned unchanged
/// @ai:effects fs:read
pub fn resolve_file_path(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }

    if let Some(candidate) = MAIN_FILE_CANDIDATES
        .iter()
        .map(|name| path.join(name))
        .find(|candidate| candidate.is_file())
    {
        return Ok(candidate);
    }

    WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .find(|candidate| is_supported_file(candidate))
        .ok_or_else(|| EvalError::NoSuitableFile(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = r#"import React from 'react';
import Header from '../components/Header';

export default function Home() {
  return (
    <main>
      <Header />
      <section aria-label="intro">Welcome</section>
    </main>
  );
}
"#;

    const HEADER: &str = r#"import React from 'react';

export default function Header() {
  return <header><nav>Links</nav></header>;
}
"#;

    const API: &str = r#"export async function GET(request) {
  const users = await db.users.findMany();
  return Response.json(users);
}
"#;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn sample_app(root: &Path) {
        write(root, "pages/index.jsx", PAGE);
        write(root, "components/Header.jsx", HEADER);
        write(root, "api/users.js", API);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("file".parse::<EvaluationMode>().unwrap(), EvaluationMode::File);
        assert_eq!("APP".parse::<EvaluationMode>().unwrap(), EvaluationMode::App);
        assert_eq!("auto".parse::<EvaluationMode>().unwrap(), EvaluationMode::Auto);
        assert!(matches!(
            "fast".parse::<EvaluationMode>(),
            Err(EvalError::InvalidMode(_))
        ));
    }

    #[test]
    fn test_identical_applications_score_high() {
        let golden = TempDir::new().unwrap();
        let generated = TempDir::new().unwrap();
        sample_app(golden.path());
        sample_app(generated.path());

        let result = Evaluator::default()
            .evaluate(golden.path(), generated.path(), EvaluationMode::Auto)
            .unwrap();

        assert_eq!(result.metadata_str("evaluation_type"), Some("application"));
        assert_eq!(result.metadata["total_files_matched"], json!(3));
        assert_eq!(result.metadata["application_level_reliable"], json!(true));
        assert!(result.overall_similarity() > 0.9);

        let stats = &result.detailed_analysis["match_statistics"];
        assert_eq!(stats["strategy_distribution"]["exact_name"], json!(3));
    }

    #[test]
    fn test_empty_generated_application_scores_zero() {
        let golden = TempDir::new().unwrap();
        let generated = TempDir::new().unwrap();
        sample_app(golden.path());

        let result = Evaluator::default()
            .evaluate(golden.path(), generated.path(), EvaluationMode::App)
            .unwrap();

        assert_eq!(result.overall_similarity(), 0.0);
        assert_eq!(result.metadata["application_level_reliable"], json!(false));

        let missing = result.detailed_analysis["structure_analysis"]["missing_files"]
            .as_array()
            .unwrap();
        assert_eq!(missing.len(), 3);
    }

    #[test]
    fn test_file_mode_resolves_directories() {
        let golden = TempDir::new().unwrap();
        let generated = TempDir::new().unwrap();
        write(golden.path(), "main.py", "def run():\n    return 1\n");
        write(generated.path(), "lib/helpers.py", "def run():\n    return 2\n");

        let result = Evaluator::default()
            .evaluate(golden.path(), generated.path(), EvaluationMode::File)
            .unwrap();

        assert_eq!(result.metadata_str("evaluation_type"), Some("file"));
        assert_eq!(result.metadata_str("golden_language"), Some("python"));
        assert!(result
            .metadata_str("generated_file")
            .unwrap()
            .ends_with("helpers.py"));
    }

    #[test]
    fn test_missing_file_yields_zero_result() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.py", "x = 1\n");

        let result = Evaluator::default()
            .evaluate(
                &temp.path().join("a.py"),
                &temp.path().join("missing.py"),
                EvaluationMode::Auto,
            )
            .unwrap();

        assert_eq!(result.overall_similarity(), 0.0);
        assert!(result.metadata_str("error").is_some());
    }

    #[test]
    fn test_unsupported_file_propagates() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.py", "x = 1\n");
        write(temp.path(), "logo.png", "not really a png");

        let err = Evaluator::default()
            .evaluate(
                &temp.path().join("a.py"),
                &temp.path().join("logo.png"),
                EvaluationMode::File,
            )
            .unwrap_err();
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_resolve_prefers_main_candidates() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a_first.js", "const a = 1;");
        write(temp.path(), "index.ts", "export const b = 2;");

        let resolved = resolve_file_path(temp.path()).unwrap();
        assert_eq!(resolved, temp.path().join("index.ts"));

        let empty = TempDir::new().unwrap();
        assert!(matches!(
            resolve_file_path(empty.path()),
            Err(EvalError::NoSuitableFile(_))
        ));
    }
}
