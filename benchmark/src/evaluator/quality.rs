//! @ai:module:intent Heuristic quality metrics comparing golden and generated code
//! @ai:module:layer infrastructure
//! @ai:module:public_api QualityScorer, QualityScores, HeuristicQualityAnalyzer, MockQualityScorer
//! @ai:module:stateless true

use crate::error::{EvalError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const PERFORMANCE_PENALTY: f64 = 0.2;
const SECURITY_PENALTY: f64 = 0.3;
const SEMANTIC_TAGS: [&str; 6] = ["<header", "<nav", "<main", "<article", "<section", "<aside"];

/// @ai:intent The eight quality dimensions produced by a quality collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityScores {
    pub functional_equivalence: f64,
    pub structural_similarity: f64,
    pub style_consistency: f64,
    pub complexity_delta: f64,
    pub performance_impact: f64,
    pub maintainability_score: f64,
    pub accessibility_score: f64,
    pub security_score: f64,
}

impl QualityScores {
    /// @ai:intent Fallback used when the quality collaborator fails
    /// @ai:effects pure
    pub fn neutral() -> Self {
        Self {
            functional_equivalence: 0.5,
            structural_similarity: 0.5,
            style_consistency: 0.5,
            complexity_delta: 0.0,
            performance_impact: 0.5,
            maintainability_score: 0.5,
            accessibility_score: 0.5,
            security_score: 0.5,
        }
    }
}

/// @ai:intent Trait for quality metric computation
pub trait QualityScorer: Send + Sync {
    fn quality_scores(&self, golden: &str, generated: &str) -> Result<QualityScores>;
}

/// @ai:intent Regex heuristics over React/TypeScript/Python sources
pub struct HeuristicQualityAnalyzer {
    function_patterns: Vec<Regex>,
    import: Regex,
    jsx_element: Regex,
    hook: Regex,
    camel_case: Regex,
    arrow: Regex,
    function_decl: Regex,
    conditional: Regex,
    looping: Regex,
    asynchronous: Regex,
    event_handler: Regex,
    use_effect: Regex,
    effect_with_deps: Regex,
    comment: Regex,
    meaningful_name: Regex,
    identifier: Regex,
    secret: Regex,
}

impl HeuristicQualityAnalyzer {
    /// @ai:intent Create a new analyzer with compiled patterns
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            function_patterns: [
                r"function\s+(\w+)",
                r"const\s+(\w+)\s*=\s*(?:async\s*)?\([^)]*\)\s*(?::\s*\w+\s*)?=>",
                r"const\s+(\w+):\s*React\.FC",
                r"def\s+(\w+)",
            ]
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect(),
            import: Regex::new(r#"import.*?from\s+["']([^"']+)["']"#).unwrap(),
            jsx_element: Regex::new(r"<(\w+)").unwrap(),
            hook: Regex::new(r"use[A-Z]\w*").unwrap(),
            camel_case: Regex::new(r"\b[a-z][a-zA-Z0-9]*\b").unwrap(),
            arrow: Regex::new(r"=>").unwrap(),
            function_decl: Regex::new(r"function\s+\w+").unwrap(),
            conditional: Regex::new(r"if|switch|\?").unwrap(),
            looping: Regex::new(r"for|while|map|forEach").unwrap(),
            asynchronous: Regex::new(r"async|await|Promise").unwrap(),
            event_handler: Regex::new(r"on\w+=\{").unwrap(),
            use_effect: Regex::new(r"useEffect\(").unwrap(),
            effect_with_deps: Regex::new(r"useEffect\([^)]+,\s*\[").unwrap(),
            comment: Regex::new(r"//|/\*|(?m)^\s*#").unwrap(),
            meaningful_name: Regex::new(r"\b[a-z][a-zA-Z]{2,}\b").unwrap(),
            identifier: Regex::new(r"\b[a-zA-Z_]\w*\b").unwrap(),
            secret: Regex::new(r#"(?i)(password|secret|key|token)\s*=\s*["'][^"']+["']"#).unwrap(),
        }
    }

    fn capture_set(pattern: &Regex, code: &str) -> BTreeSet<String> {
        pattern
            .captures_iter(code)
            .filter_map(|cap| cap.get(1).or_else(|| cap.get(0)))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// @ai:intent Distinct function and component names
    /// @ai:effects pure
    pub fn function_names(&self, code: &str) -> BTreeSet<String> {
        self.function_patterns
            .iter()
            .flat_map(|p| Self::capture_set(p, code))
            .collect()
    }

    /// @ai:intent Share of golden function names also present in generated
    /// @ai:post 1.0 when golden defines no functions
    /// @ai:effects pure
    pub fn functional_equivalence(&self, golden: &str, generated: &str) -> f64 {
        let golden_functions = self.function_names(golden);
        if golden_functions.is_empty() {
            return 1.0;
        }

        let generated_functions = self.function_names(generated);
        let common = golden_functions.intersection(&generated_functions).count();
        common as f64 / golden_functions.len() as f64
    }

    /// @ai:intent Weighted overlap of imports (0.4), JSX elements (0.4) and hooks (0.2)
    /// @ai:effects pure
    pub fn structural_similarity(&self, golden: &str, generated: &str) -> f64 {
        let overlap = |pattern: &Regex| {
            let g = Self::capture_set(pattern, golden);
            let c = Self::capture_set(pattern, generated);

            match (g.is_empty(), c.is_empty()) {
                (true, true) => 1.0,
                (true, false) => 0.0,
                _ => g.intersection(&c).count() as f64 / g.len() as f64,
            }
        };

        overlap(&self.import) * 0.4 + overlap(&self.jsx_element) * 0.4 + overlap(&self.hook) * 0.2
    }

    /// @ai:intent Mean of indentation, identifier-count and arrow-usage consistency
    /// @ai:post 0.5 when no factor applies
    /// @ai:effects pure
    pub fn style_consistency(&self, golden: &str, generated: &str) -> f64 {
        let mut factors = Vec::new();

        let indented = |code: &str| code.lines().filter(|l| l.starts_with("  ")).count();
        let golden_indented = indented(golden);
        let indent_ratio = if golden_indented == 0 {
            0.5
        } else {
            indented(generated) as f64 / golden_indented as f64
        };
        factors.push(indent_ratio.min(1.0));

        let golden_names = self.camel_case.find_iter(golden).count();
        if golden_names > 0 {
            let generated_names = self.camel_case.find_iter(generated).count();
            factors.push((generated_names as f64 / golden_names as f64).min(1.0));
        }

        let arrow_ratio = |code: &str| {
            let arrows = self.arrow.find_iter(code).count();
            let functions = self.function_decl.find_iter(code).count();
            (arrows, arrows + functions)
        };
        let (golden_arrows, golden_total) = arrow_ratio(golden);
        if golden_total > 0 {
            let (generated_arrows, generated_total) = arrow_ratio(generated);
            let golden_share = golden_arrows as f64 / golden_total as f64;
            let generated_share = if generated_total == 0 {
                0.0
            } else {
                generated_arrows as f64 / generated_total as f64
            };
            factors.push(1.0 - (golden_share - generated_share).abs());
        }

        if factors.is_empty() {
            0.5
        } else {
            factors.iter().sum::<f64>() / factors.len() as f64
        }
    }

    /// @ai:intent Keyword-weighted complexity of a code string
    /// @ai:effects pure
    pub fn complexity_score(&self, code: &str) -> f64 {
        let lines = code.split('\n').count() as f64 * 0.1;
        let functions = self.function_names(code).len() as f64 * 2.0;
        let conditionals = self.conditional.find_iter(code).count() as f64 * 1.5;
        let loops = self.looping.find_iter(code).count() as f64 * 2.0;
        let asynchronous = self.asynchronous.find_iter(code).count() as f64 * 1.5;
        let hooks = Self::capture_set(&self.hook, code).len() as f64 * 1.2;

        lines + functions + conditionals + loops + asynchronous + hooks
    }

    /// @ai:intent Relative complexity change; 0.0 when golden scores zero
    /// @ai:effects pure
    pub fn complexity_delta(&self, golden: &str, generated: &str) -> f64 {
        let golden_complexity = self.complexity_score(golden);
        if golden_complexity == 0.0 {
            return 0.0;
        }

        (self.complexity_score(generated) - golden_complexity) / golden_complexity
    }

    /// @ai:intent 1.0 minus a penalty per rendering antipattern found in generated code
    /// @ai:effects pure
    pub fn performance_impact(&self, generated: &str) -> f64 {
        let mut antipatterns = 0;

        if generated.contains(".map(") && !generated.contains("key=") {
            antipatterns += 1;
        }

        if generated.contains("useState")
            && !generated.contains("useCallback")
            && self.event_handler.find_iter(generated).count() > 2
        {
            antipatterns += 1;
        }

        if self.use_effect.find_iter(generated).count()
            > self.effect_with_deps.find_iter(generated).count()
        {
            antipatterns += 1;
        }

        (1.0 - antipatterns as f64 * PERFORMANCE_PENALTY).clamp(0.0, 1.0)
    }

    /// @ai:intent Mean of function length, comment density and name quality
    /// @ai:effects pure
    pub fn maintainability(&self, code: &str) -> f64 {
        let mut factors = Vec::new();
        let line_count = code.split('\n').count() as f64;

        let function_count = self.function_names(code).len();
        if function_count > 0 {
            let avg_length = line_count / function_count as f64;
            factors.push((1.0 - (avg_length - 20.0).max(0.0) / 30.0).clamp(0.0, 1.0));
        }

        let comments = self.comment.find_iter(code).count() as f64;
        factors.push((comments / line_count * 10.0).min(1.0));

        let identifiers = self.identifier.find_iter(code).count();
        if identifiers > 0 {
            let meaningful = self.meaningful_name.find_iter(code).count();
            factors.push(meaningful as f64 / identifiers as f64);
        }

        factors.iter().sum::<f64>() / factors.len() as f64
    }

    /// @ai:intent Share of accessibility features present, out of six
    /// @ai:effects pure
    pub fn accessibility(&self, code: &str) -> f64 {
        let features = [
            code.contains("alt="),
            code.contains("aria-"),
            SEMANTIC_TAGS.iter().any(|tag| code.contains(tag)),
            code.contains("<label") || code.contains("htmlFor="),
            code.contains("onKeyDown") || code.contains("tabIndex"),
        ];

        features.iter().filter(|present| **present).count() as f64 / 6.0
    }

    /// @ai:intent How closely generated accessibility tracks golden
    /// @ai:effects pure
    pub fn compare_accessibility(&self, golden: &str, generated: &str) -> f64 {
        if golden == generated {
            return 1.0;
        }

        let golden_score = self.accessibility(golden);
        let generated_score = self.accessibility(generated);

        if golden_score == generated_score {
            1.0
        } else if golden_score == 0.0 {
            (generated_score + 0.5).min(1.0)
        } else {
            1.0 - (golden_score - generated_score).abs()
        }
    }

    /// @ai:intent 1.0 minus a penalty per security issue found
    /// @ai:effects pure
    pub fn security(&self, code: &str) -> f64 {
        let issues = [
            code.contains("dangerouslySetInnerHTML"),
            self.secret.is_match(code),
            code.contains("eval("),
            code.contains("innerHTML") && !code.contains("dangerouslySetInnerHTML"),
        ]
        .iter()
        .filter(|found| **found)
        .count();

        (1.0 - issues as f64 * SECURITY_PENALTY).clamp(0.0, 1.0)
    }
}

impl Default for HeuristicQualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityScorer for HeuristicQualityAnalyzer {
    /// @ai:effects pure
    fn quality_scores(&self, golden: &str, generated: &str) -> Result<QualityScores> {
        Ok(QualityScores {
            functional_equivalence: self.functional_equivalence(golden, generated),
            structural_similarity: self.structural_similarity(golden, generated),
            style_consistency: self.style_consistency(golden, generated),
            complexity_delta: self.complexity_delta(golden, generated),
            performance_impact: self.performance_impact(generated),
            maintainability_score: self.maintainability(generated),
            accessibility_score: self.compare_accessibility(golden, generated),
            security_score: self.security(generated),
        })
    }
}

/// @ai:intent Mock quality scorer for testing
pub struct MockQualityScorer {
    scores: Option<QualityScores>,
}

impl MockQualityScorer {
    pub fn new(scores: QualityScores) -> Self {
        Self {
            scores: Some(scores),
        }
    }

    /// @ai:intent Create a mock scorer that always fails
    pub fn failing() -> Self {
        Self { scores: None }
    }
}

impl QualityScorer for MockQualityScorer {
    fn quality_scores(&self, _golden: &str, _generated: &str) -> Result<QualityScores> {
        self.scores.ok_or_else(|| EvalError::Collaborator {
            name: "quality",
            message: "mock failure".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTER: &str = r#"import React, { useState } from 'react';

export default function Counter() {
  const [count, setCount] = useState(0);
  const increment = () => setCount(count + 1);
  return <button onClick={increment}>{count}</button>;
}
"#;

    #[test]
    fn test_function_names() {
        let analyzer = HeuristicQualityAnalyzer::new();
        let names = analyzer.function_names(COUNTER);

        assert!(names.contains("Counter"));
        assert!(names.contains("increment"));
        assert!(analyzer.function_names("def load(path):\n    pass").contains("load"));
    }

    #[test]
    fn test_identical_code_scores() {
        let analyzer = HeuristicQualityAnalyzer::new();
        let scores = analyzer.quality_scores(COUNTER, COUNTER).unwrap();

        assert_eq!(scores.functional_equivalence, 1.0);
        assert!((scores.structural_similarity - 1.0).abs() < 1e-9);
        assert_eq!(scores.complexity_delta, 0.0);
        assert_eq!(scores.accessibility_score, 1.0);
        assert!((scores.style_consistency - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_functional_equivalence_partial() {
        let analyzer = HeuristicQualityAnalyzer::new();
        let golden = "function a() {}\nfunction b() {}";
        let generated = "function a() {}";

        assert_eq!(analyzer.functional_equivalence(golden, generated), 0.5);
        assert_eq!(analyzer.functional_equivalence("x = 1", generated), 1.0);
    }

    #[test]
    fn test_structural_similarity_without_golden_features() {
        let analyzer = HeuristicQualityAnalyzer::new();
        // golden has nothing; generated adds imports only: 0.0*0.4 + 1.0*0.4 + 1.0*0.2
        let s = analyzer.structural_similarity("x = 1", "import a from 'a';");
        assert!((s - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_security_penalties() {
        let analyzer = HeuristicQualityAnalyzer::new();

        assert_eq!(analyzer.security("const a = 1;"), 1.0);
        assert!((analyzer.security("const password = \"hunter2\"; eval(x);") - 0.4).abs() < 1e-9);
        let three_issues = analyzer.security("el.innerHTML = x; eval(y); const token = 'abc';");
        assert!((three_issues - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_performance_antipatterns() {
        let analyzer = HeuristicQualityAnalyzer::new();
        let code = "items.map(i => <li>{i}</li>); useEffect(() => { load(); });";
        assert!((analyzer.performance_impact(code) - 0.6).abs() < 1e-9);
        assert_eq!(analyzer.performance_impact("const x = 1;"), 1.0);
    }

    #[test]
    fn test_accessibility_comparison() {
        let analyzer = HeuristicQualityAnalyzer::new();
        let plain = "<div>hi</div>";
        let accessible = "<nav aria-label=\"main\"><img alt=\"logo\"/></nav>";

        assert!((analyzer.compare_accessibility(plain, accessible) - 1.0).abs() < 1e-9);
        assert!((analyzer.compare_accessibility(accessible, plain) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_neutral_scores() {
        let neutral = QualityScores::neutral();
        assert_eq!(neutral.security_score, 0.5);
        assert_eq!(neutral.complexity_delta, 0.0);
    }
}
