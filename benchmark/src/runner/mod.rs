//! @ai:module:intent Batch evaluation of competing model outputs and their ranking
//! @ai:module:layer application
//! @ai:module:public_api ModelOutput, BatchRanker, BatchEvaluationResult, RankedModel, SummaryStatistics

pub mod batch;
pub mod ranking;

pub use batch::ModelOutput;
pub use ranking::{BatchEvaluationResult, BatchRanker, RankedModel, SummaryStatistics};
