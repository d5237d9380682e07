//! @ai:module:intent Run the matching passes in priority order and summarize the outcome
//! @ai:module:layer application
//! @ai:module:public_api FileMatcher, MatchStatistics
//! @ai:module:depends_on matching::strategy, config
//! @ai:module:stateless true

use super::analysis::FileAnalysis;
use super::result::FileMatchResult;
use super::strategy::{
    Candidate, ComponentSignaturePass, ContentSimilarityPass, ExactNamePass, FallbackPass,
    FunctionalityPass, MatchPass,
};
use crate::config::MatchingConfig;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// @ai:intent Orchestrates the ordered passes and owns the consumed-file set
pub struct FileMatcher {
    passes: Vec<Box<dyn MatchPass>>,
}

impl FileMatcher {
    /// @ai:intent Create a matcher with the five standard passes
    /// @ai:effects pure
    pub fn new(config: &MatchingConfig) -> Self {
        Self::with_passes(vec![
            Box::new(ExactNamePass),
            Box::new(ComponentSignaturePass {
                threshold: config.signature_threshold,
            }),
            Box::new(FunctionalityPass {
                threshold: config.functionality_threshold,
                type_boost: config.functionality_type_boost,
            }),
            Box::new(ContentSimilarityPass {
                threshold: config.content_threshold,
            }),
            Box::new(FallbackPass {
                same_type_confidence: config.fallback_type_confidence,
                any_confidence: config.fallback_any_confidence,
            }),
        ])
    }

    /// @ai:intent Create a matcher with a custom pass list
    /// @ai:effects pure
    pub fn with_passes(passes: Vec<Box<dyn MatchPass>>) -> Self {
        Self { passes }
    }

    /// @ai:intent Produce a one-to-one partial mapping from golden to generated files
    /// @ai:post every generated key is used at most once; each golden key has at most one match
    /// @ai:post when generated is non-empty every golden key is matched, provided the fallback pass runs
    /// @ai:effects pure
    pub fn match_files(
        &self,
        golden: &BTreeMap<String, FileAnalysis>,
        generated: &BTreeMap<String, FileAnalysis>,
    ) -> BTreeMap<String, FileMatchResult> {
        let mut matches: BTreeMap<String, FileMatchResult> = BTreeMap::new();
        let mut used: HashSet<String> = HashSet::new();

        for pass in &self.passes {
            let remaining_golden: Vec<Candidate<'_>> = golden
                .iter()
                .filter(|(key, _)| !matches.contains_key(*key))
                .map(|(key, analysis)| (key.as_str(), analysis))
                .collect();

            let remaining_generated: Vec<Candidate<'_>> = generated
                .iter()
                .filter(|(key, _)| !used.contains(*key))
                .map(|(key, analysis)| (key.as_str(), analysis))
                .collect();

            if remaining_golden.is_empty() || remaining_generated.is_empty() {
                break;
            }

            for result in pass.run(&remaining_golden, &remaining_generated) {
                // A pass must only return keys it was given
                if matches.contains_key(&result.golden_file) || used.contains(&result.generated_file) {
                    tracing::warn!(
                        "Pass {} returned an already consumed pairing, ignoring",
                        pass.strategy()
                    );
                    continue;
                }

                tracing::debug!(
                    "{} -> {} via {} ({:.2})",
                    result.golden_file,
                    result.generated_file,
                    result.match_strategy,
                    result.confidence()
                );

                used.insert(result.generated_file.clone());
                matches.insert(result.golden_file.clone(), result);
            }
        }

        tracing::info!("Matched {} files out of {}", matches.len(), golden.len());
        matches
    }
}

impl Default for FileMatcher {
    fn default() -> Self {
        Self::new(&MatchingConfig::default())
    }
}

/// @ai:intent Confidence distribution of a match map
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchStatistics {
    pub total_files: usize,
    pub avg_confidence: f64,
    pub min_confidence: f64,
    pub max_confidence: f64,
    pub high_confidence_matches: usize,
    pub medium_confidence_matches: usize,
    pub low_confidence_matches: usize,
    pub strategy_distribution: BTreeMap<String, usize>,
}

impl MatchStatistics {
    /// @ai:intent Summarize confidences and strategies; all zero for an empty map
    /// @ai:effects pure
    pub fn from_matches(matches: &BTreeMap<String, FileMatchResult>) -> Self {
        if matches.is_empty() {
            return Self::default();
        }

        let confidences: Vec<f64> = matches.values().map(FileMatchResult::confidence).collect();
        let mut stats = Self {
            total_files: matches.len(),
            avg_confidence: confidences.iter().sum::<f64>() / confidences.len() as f64,
            min_confidence: confidences.iter().copied().fold(f64::INFINITY, f64::min),
            max_confidence: confidences.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            ..Self::default()
        };

        for m in matches.values() {
            let c = m.confidence();
            if c >= 0.8 {
                stats.high_confidence_matches += 1;
            } else if c >= 0.5 {
                stats.medium_confidence_matches += 1;
            } else {
                stats.low_confidence_matches += 1;
            }

            *stats
                .strategy_distribution
                .entry(m.match_strategy.as_str().to_string())
                .or_insert(0) += 1;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::analysis::{FileAnalyzer, FileType};
    use crate::matching::result::MatchStrategy;
    use std::collections::BTreeSet;
    use std::path::{Path, PathBuf};

    fn analyzed(analyzer: &FileAnalyzer, files: &[(&str, &str)]) -> BTreeMap<String, FileAnalysis> {
        files
            .iter()
            .map(|(path, content)| (path.to_string(), analyzer.analyze(Path::new(path), content)))
            .collect()
    }

    fn bare(path: &str, file_type: FileType, signature: &str, complexity: f64) -> FileAnalysis {
        FileAnalysis {
            path: PathBuf::from(path),
            file_type,
            component_name: None,
            exports: BTreeSet::new(),
            imports: BTreeSet::new(),
            dependencies: BTreeSet::new(),
            complexity_score: complexity,
            functionality_signature: signature.to_string(),
            content_hash: String::new(),
        }
    }

    #[test]
    fn test_exact_name_scenario() {
        let analyzer = FileAnalyzer::new();
        let golden = analyzed(
            &analyzer,
            &[("golden/Button.tsx", "export default function Button() { return <button/>; }")],
        );
        let generated = analyzed(
            &analyzer,
            &[("generated/Button.tsx", "export const Button = () => <div/>;")],
        );

        let matches = FileMatcher::default().match_files(&golden, &generated);

        assert_eq!(matches.len(), 1);
        let m = &matches["golden/Button.tsx"];
        assert_eq!(m.generated_file, "generated/Button.tsx");
        assert_eq!(m.match_strategy, MatchStrategy::ExactName);
        assert_eq!(m.confidence(), 1.0);
    }

    #[test]
    fn test_fallback_only_scenario() {
        let mut golden = BTreeMap::new();
        golden.insert(
            "X.py".to_string(),
            bare("X.py", FileType::Unknown, "func:compute_totals|state_count:0", 0.0),
        );

        let mut generated = BTreeMap::new();
        generated.insert(
            "Y.js".to_string(),
            bare(
                "Y.js",
                FileType::Config,
                "jsx:div|jsx:span|hook:useState|state_count:1",
                1.0,
            ),
        );

        let matches = FileMatcher::default().match_files(&golden, &generated);

        assert_eq!(matches.len(), 1);
        let m = &matches["X.py"];
        assert_eq!(m.generated_file, "Y.js");
        assert_eq!(m.match_strategy, MatchStrategy::Fallback);
        assert!((m.confidence() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_empty_inputs_yield_empty_map() {
        let matcher = FileMatcher::default();
        let empty = BTreeMap::new();

        assert!(matcher.match_files(&empty, &empty).is_empty());

        let analyzer = FileAnalyzer::new();
        let golden = analyzed(&analyzer, &[("a.ts", "export const a = 1;")]);
        assert!(matcher.match_files(&golden, &empty).is_empty());
        assert!(matcher.match_files(&empty, &golden).is_empty());
    }

    #[test]
    fn test_exclusivity_and_coverage() {
        let analyzer = FileAnalyzer::new();
        let golden = analyzed(
            &analyzer,
            &[
                ("g/Header.tsx", "export default function Header() { return <header/>; }"),
                ("g/Footer.tsx", "export default function Footer() { return <footer/>; }"),
                ("g/api/users.ts", "export async function GET() { return []; }"),
                ("g/styles.css", "body { margin: 0; }"),
            ],
        );
        let generated = analyzed(
            &analyzer,
            &[
                ("c/Header.tsx", "export default function Header() { return <nav/>; }"),
                ("c/Bottom.tsx", "export default function Footer() { return <footer/>; }"),
                ("c/main.css", "body { padding: 0; }"),
                ("c/extra.md", "# notes"),
                ("c/more.md", "# more"),
            ],
        );

        let matches = FileMatcher::default().match_files(&golden, &generated);

        // every golden file is covered because the generated pool is larger
        assert_eq!(matches.len(), golden.len());

        let used: HashSet<&str> = matches.values().map(|m| m.generated_file.as_str()).collect();
        assert_eq!(used.len(), matches.len());

        for m in matches.values() {
            assert!((0.0..=1.0).contains(&m.confidence()));
        }
        assert_eq!(matches["g/Header.tsx"].match_strategy, MatchStrategy::ExactName);
    }

    #[test]
    fn test_statistics() {
        let mut matches = BTreeMap::new();
        matches.insert(
            "a".to_string(),
            FileMatchResult::new("a", "x", 1.0, MatchStrategy::ExactName, vec![]),
        );
        matches.insert(
            "b".to_string(),
            FileMatchResult::new("b", "y", 0.6, MatchStrategy::ContentSimilarity, vec![]),
        );
        matches.insert(
            "c".to_string(),
            FileMatchResult::new("c", "z", 0.1, MatchStrategy::Fallback, vec![]),
        );

        let stats = MatchStatistics::from_matches(&matches);

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.high_confidence_matches, 1);
        assert_eq!(stats.medium_confidence_matches, 1);
        assert_eq!(stats.low_confidence_matches, 1);
        assert!((stats.avg_confidence - 1.7 / 3.0).abs() < 1e-9);
        assert_eq!(stats.min_confidence, 0.1);
        assert_eq!(stats.strategy_distribution["fallback"], 1);
        assert_eq!(MatchStatistics::from_matches(&BTreeMap::new()), MatchStatistics::default());
    }
}
