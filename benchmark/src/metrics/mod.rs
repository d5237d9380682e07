//! @ai:module:intent Score types, application aggregation and structural diagnostics
//! @ai:module:layer application
//! @ai:module:public_api Scores, EvaluationResult, ApplicationAggregator, StructureAnalysis, analyze_structure, generate_recommendations

pub mod aggregator;
pub mod structure;
pub mod types;

pub use aggregator::{ApplicationAggregator, ApplicationAggregatorTrait};
pub use structure::{
    analyze_structure, generate_recommendations, language_compatibility, ArchitecturePatterns,
    CompatibilityStatus, FunctionalityCoverage, LanguageCompatibility, StructureAnalysis,
};
pub use types::{EvaluationResult, Scores};
