//! @ai:module:intent Configuration structs for the evaluation engine
//! @ai:module:layer infrastructure
//! @ai:module:public_api EvalConfig, ScoreWeights, MatchingConfig, PlanConfig, BatchConfig, ReportConfig
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "fern-eval.toml";

/// @ai:intent Main configuration for the evaluation engine
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvalConfig {
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub plan: PlanConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// @ai:intent Weights combining per-dimension scores into the overall similarity
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_semantic_weight")]
    pub semantic: f64,
    #[serde(default = "default_functional_weight")]
    pub functional: f64,
    #[serde(default = "default_structural_weight")]
    pub structural: f64,
    #[serde(default = "default_style_weight")]
    pub style: f64,
    #[serde(default = "default_maintainability_weight")]
    pub maintainability: f64,
    #[serde(default = "default_accessibility_weight")]
    pub accessibility: f64,
}

/// @ai:intent Acceptance thresholds and fixed confidences of the matching passes
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default = "default_signature_threshold")]
    pub signature_threshold: f64,
    #[serde(default = "default_functionality_threshold")]
    pub functionality_threshold: f64,
    #[serde(default = "default_functionality_type_boost")]
    pub functionality_type_boost: f64,
    #[serde(default = "default_content_threshold")]
    pub content_threshold: f64,
    #[serde(default = "default_fallback_type_confidence")]
    pub fallback_type_confidence: f64,
    #[serde(default = "default_fallback_any_confidence")]
    pub fallback_any_confidence: f64,
}

/// @ai:intent Tier boundaries of the evaluation plan
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_direct_threshold")]
    pub direct_threshold: f64,
    #[serde(default = "default_semantic_threshold")]
    pub semantic_threshold: f64,
    #[serde(default = "default_structural_threshold")]
    pub structural_threshold: f64,
    /// Confidence a match needs to count as reliable for application gating
    #[serde(default = "default_reliable_confidence")]
    pub reliable_confidence: f64,
    /// Share of reliable matches required for application-level evaluation
    #[serde(default = "default_reliable_ratio")]
    pub reliable_ratio: f64,
}

/// @ai:intent Batch evaluation options
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub concurrent: bool,
}

/// @ai:intent Report output options
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_charts")]
    pub charts: bool,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            semantic: default_semantic_weight(),
            functional: default_functional_weight(),
            structural: default_structural_weight(),
            style: default_style_weight(),
            maintainability: default_maintainability_weight(),
            accessibility: default_accessibility_weight(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            signature_threshold: default_signature_threshold(),
            functionality_threshold: default_functionality_threshold(),
            functionality_type_boost: default_functionality_type_boost(),
            content_threshold: default_content_threshold(),
            fallback_type_confidence: default_fallback_type_confidence(),
            fallback_any_confidence: default_fallback_any_confidence(),
        }
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            direct_threshold: default_direct_threshold(),
            semantic_threshold: default_semantic_threshold(),
            structural_threshold: default_structural_threshold(),
            reliable_confidence: default_reliable_confidence(),
            reliable_ratio: default_reliable_ratio(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            charts: default_charts(),
        }
    }
}

fn default_semantic_weight() -> f64 {
    0.80
}

fn default_functional_weight() -> f64 {
    0.08
}

fn default_structural_weight() -> f64 {
    0.05
}

fn default_style_weight() -> f64 {
    0.03
}

fn default_maintainability_weight() -> f64 {
    0.025
}

fn default_accessibility_weight() -> f64 {
    0.015
}

fn default_signature_threshold() -> f64 {
    0.7
}

fn default_functionality_threshold() -> f64 {
    0.6
}

fn default_functionality_type_boost() -> f64 {
    1.2
}

fn default_content_threshold() -> f64 {
    0.5
}

fn default_fallback_type_confidence() -> f64 {
    0.3
}

fn default_fallback_any_confidence() -> f64 {
    0.1
}

fn default_direct_threshold() -> f64 {
    0.8
}

fn default_semantic_threshold() -> f64 {
    0.5
}

fn default_structural_threshold() -> f64 {
    0.3
}

fn default_reliable_confidence() -> f64 {
    0.5
}

fn default_reliable_ratio() -> f64 {
    0.6
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_charts() -> bool {
    true
}

impl ScoreWeights {
    /// @ai:intent Sum of all weights
    /// @ai:effects pure
    pub fn total(&self) -> f64 {
        self.semantic
            + self.functional
            + self.structural
            + self.style
            + self.maintainability
            + self.accessibility
    }

    /// @ai:intent Rescale weights so they sum to 1.0
    /// @ai:post returns self unchanged when the sum is already within 0.01 of 1.0 or not positive
    /// @ai:effects pure
    pub fn normalized(&self) -> Self {
        let total = self.total();

        if (total - 1.0).abs() <= 0.01 || total <= 0.0 {
            return *self;
        }

        Self {
            semantic: self.semantic / total,
            functional: self.functional / total,
            structural: self.structural / total,
            style: self.style / total,
            maintainability: self.maintainability / total,
            accessibility: self.accessibility / total,
        }
    }
}

impl EvalConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Load the given file, else the default file in the working directory, else defaults
    /// @ai:effects fs:read
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);

                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
