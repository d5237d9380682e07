//! @ai:module:intent Fern evaluation engine library
//! @ai:module:layer application
//! @ai:module:public_api config, error, evaluator, matching, metrics, report, runner
//!
//! Scores AI-generated code against a golden reference, either one file
//! pair at a time or as whole applications whose files are paired by a
//! chain of matching strategies, and ranks several models against the
//! same golden standard.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod matching;
pub mod metrics;
pub mod report;
pub mod runner;

pub use config::EvalConfig;
pub use error::{EvalError, Result};
pub use evaluator::{EvaluationMode, Evaluator};
pub use matching::{FileAnalyzer, FileMatchResult, FileMatcher, MatchStrategy};
pub use metrics::{EvaluationResult, Scores};
pub use report::ReportGenerator;
pub use runner::{BatchEvaluationResult, BatchRanker, ModelOutput};
