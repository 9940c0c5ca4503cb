//! Data ingestion and normalization for the pricing analytics pipeline.
//!
//! This crate handles:
//! - Raw table reading (delimited text with encoding fallback, workbooks)
//! - Schema normalization onto the canonical field set
//! - Record cleaning and revenue derivation
//! - Content-hash-keyed parse caching

pub mod cache;
pub mod cleaner;
pub mod reader;
pub mod schema;

pub use cache::TableCache;
pub use cleaner::clean;
pub use reader::RawTable;
pub use schema::{normalize, AliasTable, NormalizedTable};
