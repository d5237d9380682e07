//! @ai:module:intent The five ordered matching passes pairing golden files with generated files
//! @ai:module:layer domain
//! @ai:module:public_api MatchPass, ExactNamePass, ComponentSignaturePass, FunctionalityPass, ContentSimilarityPass, FallbackPass
//! @ai:module:depends_on matching::analysis, matching::result
//! @ai:module:stateless true

use super::analysis::FileAnalysis;
use super::result::{FileMatchResult, MatchStrategy};
use similar::TextDiff;
use std::collections::{BTreeSet, HashSet};

/// A keyed analysis as seen by a pass.
pub type Candidate<'a> = (&'a str, &'a FileAnalysis);

/// @ai:intent One matching pass over the still-unmatched files
/// @ai:pre both slices contain only files no earlier pass consumed
/// @ai:post each generated key appears in at most one returned match
pub trait MatchPass: Send + Sync {
    fn strategy(&self) -> MatchStrategy;

    fn run(&self, golden: &[Candidate<'_>], generated: &[Candidate<'_>]) -> Vec<FileMatchResult>;
}

/// @ai:intent Matched-character ratio of two strings, 2 * matches / total length
/// @ai:post 1.0 for two empty strings, 0.0 when nothing matches
/// @ai:example ("abcd", "bcde") -> 0.75
/// @ai:effects pure
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    f64::from(TextDiff::from_chars(a, b).ratio())
}

/// @ai:intent Greedy best-candidate selection shared by the scored passes
/// @ai:post a candidate is accepted only when its score is strictly above the threshold
fn greedy_best<F, R>(
    golden: &[Candidate<'_>],
    generated: &[Candidate<'_>],
    threshold: f64,
    strategy: MatchStrategy,
    score: F,
    reasons: R,
) -> Vec<FileMatchResult>
where
    F: Fn(&FileAnalysis, &FileAnalysis) -> f64,
    R: Fn(&FileAnalysis, &FileAnalysis, f64) -> Vec<String>,
{
    let mut taken: HashSet<&str> = HashSet::new();
    let mut matches = Vec::new();

    for (golden_key, golden_analysis) in golden {
        let mut best: Option<(&str, &FileAnalysis, f64)> = None;

        for (generated_key, generated_analysis) in generated {
            if taken.contains(generated_key) {
                continue;
            }

            let s = score(golden_analysis, generated_analysis);
            if s > threshold && best.map_or(true, |(_, _, b)| s > b) {
                best = Some((*generated_key, *generated_analysis, s));
            }
        }

        if let Some((generated_key, generated_analysis, s)) = best {
            taken.insert(generated_key);
            matches.push(FileMatchResult::new(
                *golden_key,
                generated_key,
                s,
                strategy,
                reasons(golden_analysis, generated_analysis, s),
            ));
        }
    }

    matches
}

/// @ai:intent Overlap of two sets relative to their union; zero when either is empty
/// @ai:effects pure
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let common = a.intersection(b).count();
    let union = a.union(b).count();
    common as f64 / union as f64
}

/// @ai:intent Pass 1: identical file names
pub struct ExactNamePass;

impl MatchPass for ExactNamePass {
    fn strategy(&self) -> MatchStrategy {
        MatchStrategy::ExactName
    }

    fn run(&self, golden: &[Candidate<'_>], generated: &[Candidate<'_>]) -> Vec<FileMatchResult> {
        let mut taken: HashSet<&str> = HashSet::new();
        let mut matches = Vec::new();

        for (golden_key, golden_analysis) in golden {
            let Some(name) = golden_analysis.file_name() else {
                continue;
            };

            let found = generated
                .iter()
                .find(|(key, analysis)| !taken.contains(key) && analysis.file_name() == Some(name));

            if let Some((generated_key, _)) = found {
                taken.insert(*generated_key);
                matches.push(FileMatchResult::new(
                    *golden_key,
                    *generated_key,
                    1.0,
                    MatchStrategy::ExactName,
                    vec!["identical_filename".to_string()],
                ));
            }
        }

        matches
    }
}

/// @ai:intent Pass 2: component name, exports, dependencies and file type
pub struct ComponentSignaturePass {
    pub threshold: f64,
}

impl ComponentSignaturePass {
    /// @ai:intent Weighted signature score
    /// @ai:effects pure
    pub fn score(golden: &FileAnalysis, generated: &FileAnalysis) -> f64 {
        let mut score = 0.0;

        if let (Some(a), Some(b)) = (&golden.component_name, &generated.component_name) {
            score += sequence_ratio(a, b) * 0.3;
        }

        if !golden.exports.is_empty() && !generated.exports.is_empty() {
            let common = golden.exports.intersection(&generated.exports).count();
            score += common as f64 / golden.exports.len() as f64 * 0.3;
        }

        score += jaccard(&golden.dependencies, &generated.dependencies) * 0.2;

        if golden.file_type == generated.file_type {
            score += 0.2;
        }

        score.min(1.0)
    }

    fn reasons(golden: &FileAnalysis, generated: &FileAnalysis) -> Vec<String> {
        let mut reasons = Vec::new();

        if golden.component_name.is_some() && golden.component_name == generated.component_name {
            reasons.push("identical_component_name".to_string());
        }

        let common: Vec<&str> = golden
            .exports
            .intersection(&generated.exports)
            .map(String::as_str)
            .collect();
        if !common.is_empty() {
            reasons.push(format!("common_exports: {}", common.join(", ")));
        }

        if golden.file_type == generated.file_type {
            reasons.push(format!("same_file_type: {}", golden.file_type));
        }

        reasons
    }
}

impl MatchPass for ComponentSignaturePass {
    fn strategy(&self) -> MatchStrategy {
        MatchStrategy::ComponentSignature
    }

    fn run(&self, golden: &[Candidate<'_>], generated: &[Candidate<'_>]) -> Vec<FileMatchResult> {
        greedy_best(
            golden,
            generated,
            self.threshold,
            self.strategy(),
            Self::score,
            |g, c, _| Self::reasons(g, c),
        )
    }
}

/// @ai:intent Pass 3: functionality signature similarity, boosted on equal file type
pub struct FunctionalityPass {
    pub threshold: f64,
    pub type_boost: f64,
}

impl FunctionalityPass {
    /// @ai:effects pure
    pub fn score(&self, golden: &FileAnalysis, generated: &FileAnalysis) -> f64 {
        let mut similarity = sequence_ratio(
            &golden.functionality_signature,
            &generated.functionality_signature,
        );

        if golden.file_type == generated.file_type {
            similarity *= self.type_boost;
        }

        similarity.clamp(0.0, 1.0)
    }
}

impl MatchPass for FunctionalityPass {
    fn strategy(&self) -> MatchStrategy {
        MatchStrategy::Functionality
    }

    fn run(&self, golden: &[Candidate<'_>], generated: &[Candidate<'_>]) -> Vec<FileMatchResult> {
        greedy_best(
            golden,
            generated,
            self.threshold,
            self.strategy(),
            |g, c| self.score(g, c),
            |_, _, s| vec![format!("functionality_similarity: {:.2}", s)],
        )
    }
}

/// @ai:intent Pass 4: blended signature, complexity, import and type similarity
pub struct ContentSimilarityPass {
    pub threshold: f64,
}

impl ContentSimilarityPass {
    /// @ai:effects pure
    pub fn score(golden: &FileAnalysis, generated: &FileAnalysis) -> f64 {
        let signature = sequence_ratio(
            &golden.functionality_signature,
            &generated.functionality_signature,
        );
        let complexity = 1.0 - (golden.complexity_score - generated.complexity_score).abs();
        let imports = jaccard(&golden.imports, &generated.imports);
        let type_bonus = if golden.file_type == generated.file_type {
            1.0
        } else {
            0.0
        };

        (signature * 0.4 + complexity * 0.2 + imports * 0.2 + type_bonus * 0.2).clamp(0.0, 1.0)
    }
}

impl MatchPass for ContentSimilarityPass {
    fn strategy(&self) -> MatchStrategy {
        MatchStrategy::ContentSimilarity
    }

    fn run(&self, golden: &[Candidate<'_>], generated: &[Candidate<'_>]) -> Vec<FileMatchResult> {
        greedy_best(
            golden,
            generated,
            self.threshold,
            self.strategy(),
            Self::score,
            |_, _, s| vec![format!("content_similarity: {:.2}", s)],
        )
    }
}

/// @ai:intent Pass 5: pair every remaining golden file with something, if anything remains
/// @ai:post prefers the first generated file of the same type, else the first remaining file
pub struct FallbackPass {
    pub same_type_confidence: f64,
    pub any_confidence: f64,
}

impl MatchPass for FallbackPass {
    fn strategy(&self) -> MatchStrategy {
        MatchStrategy::Fallback
    }

    fn run(&self, golden: &[Candidate<'_>], generated: &[Candidate<'_>]) -> Vec<FileMatchResult> {
        let mut taken: HashSet<&str> = HashSet::new();
        let mut matches = Vec::new();

        for (golden_key, golden_analysis) in golden {
            let mut remaining = generated.iter().filter(|(key, _)| !taken.contains(key));

            let same_type = remaining
                .clone()
                .find(|(_, analysis)| analysis.file_type == golden_analysis.file_type);

            let chosen = match same_type {
                Some((key, _)) => Some((*key, self.same_type_confidence)),
                None => remaining.next().map(|(key, _)| (*key, self.any_confidence)),
            };

            if let Some((generated_key, confidence)) = chosen {
                taken.insert(generated_key);
                matches.push(FileMatchResult::new(
                    *golden_key,
                    generated_key,
                    confidence,
                    MatchStrategy::Fallback,
                    vec!["fallback_match".to_string()],
                ));
            }
        }

        matches
    }
}
