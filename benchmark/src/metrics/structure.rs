//! @ai:module:intent Structural diagnostics comparing two application structures
//! @ai:module:layer domain
//! @ai:module:public_api StructureAnalysis, LanguageCompatibility, CompatibilityStatus, FunctionalityCoverage, ArchitecturePatterns, analyze_structure, language_compatibility, generate_recommendations
//! @ai:module:depends_on fern_parser, matching
//! @ai:module:stateless true

use crate::matching::FileMatchResult;
use crate::metrics::types::EvaluationResult;
use fern_parser::ApplicationStructure;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityStatus {
    Compatible,
    PartiallyCompatible,
    Incompatible,
}

impl CompatibilityStatus {
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityStatus::Compatible => "compatible",
            CompatibilityStatus::PartiallyCompatible => "partially_compatible",
            CompatibilityStatus::Incompatible => "incompatible",
        }
    }
}

/// @ai:intent Overlap between the detected language sets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageCompatibility {
    pub status: CompatibilityStatus,
    /// |common| / max(|golden|, |generated|) × 100; 100 when both are empty
    pub overlap_percentage: f64,
    pub common_languages: BTreeSet<String>,
    pub missing_languages: BTreeSet<String>,
    pub extra_languages: BTreeSet<String>,
    /// |common| / |union|; 1.0 when both are empty
    pub language_similarity: f64,
}

/// @ai:intent Overlap between the functionality categories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionalityCoverage {
    pub covered: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    pub extra: BTreeSet<String>,
    pub functionality_coverage: f64,
}

/// @ai:intent Side-by-side counts describing how each application is organized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchitecturePatterns {
    pub golden_files_by_functionality: BTreeMap<String, usize>,
    pub generated_files_by_functionality: BTreeMap<String, usize>,
    pub golden_total_files: usize,
    pub generated_total_files: usize,
    pub golden_frameworks: Vec<String>,
    pub generated_frameworks: Vec<String>,
}

/// @ai:intent All structural diagnostics of an application comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureAnalysis {
    pub language_compatibility: LanguageCompatibility,
    pub functionality_coverage: FunctionalityCoverage,
    pub directory_similarity: f64,
    pub missing_files: Vec<String>,
    pub extra_files: Vec<String>,
    pub architecture_patterns: ArchitecturePatterns,
}

/// @ai:intent Compute every structural diagnostic
/// @ai:effects pure
pub fn analyze_structure(
    golden: &ApplicationStructure,
    generated: &ApplicationStructure,
    matches: &BTreeMap<String, FileMatchResult>,
) -> StructureAnalysis {
    StructureAnalysis {
        language_compatibility: language_compatibility(
            &golden.detected_languages(),
            &generated.detected_languages(),
        ),
        functionality_coverage: functionality_coverage(
            &golden.functionalities(),
            &generated.functionalities(),
        ),
        directory_similarity: directory_similarity(golden, generated),
        missing_files: missing_files(golden, matches),
        extra_files: extra_files(generated, matches),
        architecture_patterns: architecture_patterns(golden, generated),
    }
}

/// @ai:intent Compare detected language sets
/// @ai:example ({python, javascript, css}, {python, typescript, css}) -> partially_compatible, 66.67%
/// @ai:effects pure
pub fn language_compatibility(
    golden: &BTreeSet<String>,
    generated: &BTreeSet<String>,
) -> LanguageCompatibility {
    let common: BTreeSet<String> = golden.intersection(generated).cloned().collect();
    let union_len = golden.union(generated).count();

    let language_similarity = if union_len == 0 {
        1.0
    } else {
        common.len() as f64 / union_len as f64
    };

    let max_len = golden.len().max(generated.len());
    let overlap_percentage = if max_len == 0 {
        100.0
    } else {
        common.len() as f64 / max_len as f64 * 100.0
    };

    let status = if language_similarity >= 1.0 {
        CompatibilityStatus::Compatible
    } else if language_similarity >= 0.5 {
        CompatibilityStatus::PartiallyCompatible
    } else {
        CompatibilityStatus::Incompatible
    };

    LanguageCompatibility {
        status,
        overlap_percentage,
        common_languages: common,
        missing_languages: golden.difference(generated).cloned().collect(),
        extra_languages: generated.difference(golden).cloned().collect(),
        language_similarity,
    }
}

/// @ai:intent Compare functionality categories; coverage is 1.0 for an empty golden set
/// @ai:effects pure
pub fn functionality_coverage(
    golden: &BTreeSet<String>,
    generated: &BTreeSet<String>,
) -> FunctionalityCoverage {
    let covered: BTreeSet<String> = golden.intersection(generated).cloned().collect();

    let functionality_coverage = if golden.is_empty() {
        1.0
    } else {
        covered.len() as f64 / golden.len() as f64
    };

    FunctionalityCoverage {
        covered,
        missing: golden.difference(generated).cloned().collect(),
        extra: generated.difference(golden).cloned().collect(),
        functionality_coverage,
    }
}

/// @ai:intent Jaccard overlap of the parent directories, relative to each root
/// @ai:effects pure
pub fn directory_similarity(golden: &ApplicationStructure, generated: &ApplicationStructure) -> f64 {
    let golden_dirs: BTreeSet<String> = golden.files.iter().map(|f| f.relative_parent()).collect();
    let generated_dirs: BTreeSet<String> =
        generated.files.iter().map(|f| f.relative_parent()).collect();

    if golden_dirs.is_empty() {
        return if generated_dirs.is_empty() { 1.0 } else { 0.0 };
    }

    let common = golden_dirs.intersection(&generated_dirs).count();
    let total = golden_dirs.union(&generated_dirs).count();
    common as f64 / total as f64
}

/// @ai:intent Golden files without a match entry
/// @ai:effects pure
pub fn missing_files(
    golden: &ApplicationStructure,
    matches: &BTreeMap<String, FileMatchResult>,
) -> Vec<String> {
    golden
        .file_paths()
        .into_iter()
        .filter(|path| !matches.contains_key(path))
        .collect()
}

/// @ai:intent Generated files never consumed by a match
/// @ai:effects pure
pub fn extra_files(
    generated: &ApplicationStructure,
    matches: &BTreeMap<String, FileMatchResult>,
) -> Vec<String> {
    let used: BTreeSet<&str> = matches.values().map(|m| m.generated_file.as_str()).collect();

    generated
        .file_paths()
        .into_iter()
        .filter(|path| !used.contains(path.as_str()))
        .collect()
}

fn count_by_functionality(structure: &ApplicationStructure) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for file in &structure.files {
        *counts.entry(file.functionality.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

/// @ai:effects pure
pub fn architecture_patterns(
    golden: &ApplicationStructure,
    generated: &ApplicationStructure,
) -> ArchitecturePatterns {
    ArchitecturePatterns {
        golden_files_by_functionality: count_by_functionality(golden),
        generated_files_by_functionality: count_by_functionality(generated),
        golden_total_files: golden.total_files(),
        generated_total_files: generated.total_files(),
        golden_frameworks: golden.detected_frameworks.clone(),
        generated_frameworks: generated.detected_frameworks.clone(),
    }
}

/// @ai:intent Advisory hints derived from the diagnostics; never part of the score
/// @ai:effects pure
pub fn generate_recommendations(
    file_results: &BTreeMap<String, EvaluationResult>,
    structure: &StructureAnalysis,
    matches: &BTreeMap<String, FileMatchResult>,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    let similarity = structure.language_compatibility.language_similarity;
    if similarity < 0.8 {
        recommendations.push(format!(
            "Consider using more similar technologies - language compatibility is {:.1}%",
            similarity * 100.0
        ));
    }

    let missing: Vec<&str> = structure
        .functionality_coverage
        .missing
        .iter()
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        let shown = missing.iter().take(3).copied().collect::<Vec<_>>().join(", ");
        let ellipsis = if missing.len() > 3 { "..." } else { "" };
        recommendations.push(format!("Missing functionality areas: {}{}", shown, ellipsis));
    }

    let low_confidence = matches.values().filter(|m| m.confidence() < 0.5).count();
    if low_confidence > 0 {
        recommendations.push(format!(
            "Consider improving file organization - {} files had low match confidence",
            low_confidence
        ));
    }

    if !structure.missing_files.is_empty() {
        recommendations.push(format!(
            "Missing {} files from golden standard",
            structure.missing_files.len()
        ));
    }

    let low_quality = file_results
        .values()
        .filter(|r| r.overall_similarity() < 0.6)
        .count();
    if low_quality > 0 {
        recommendations.push(format!(
            "Improve code quality in {} files with low similarity scores",
            low_quality
        ));
    }

    recommendations
}
