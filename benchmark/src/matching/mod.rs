//! @ai:module:intent Pair golden files with generated files across two applications
//! @ai:module:layer domain
//! @ai:module:public_api FileAnalyzer, FileAnalysis, FileType, FileMatcher, FileMatchResult, MatchStrategy, MatchStatistics, MatchPass
//! @ai:module:depends_on fern_parser, config
//! @ai:module:stateless true

pub mod analysis;
pub mod matcher;
pub mod result;
pub mod strategy;

pub use analysis::{FileAnalysis, FileAnalyzer, FileType};
pub use matcher::{FileMatcher, MatchStatistics};
pub use result::{FileMatchResult, MatchStrategy};
pub use strategy::{
    jaccard, Candidate, ComponentSignaturePass, ContentSimilarityPass, ExactNamePass, FallbackPass,
    FunctionalityPass, MatchPass, sequence_ratio,
};
