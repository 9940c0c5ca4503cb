//! Analysis driver and export for the pricing analytics pipeline.
//!
//! This crate provides:
//! - The stage-by-stage pipeline driver producing an `AnalysisReport`
//! - CSV export of the aggregates table (UTF-8 with a byte-order mark)

pub mod export;
pub mod pipeline;

pub use export::export_aggregates_csv;
pub use pipeline::{AnalysisPipeline, AnalysisReport};
