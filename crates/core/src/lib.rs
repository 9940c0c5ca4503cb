//! Core types and configuration for the pricing analytics pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Cleaned transaction records and the working set
//! - Partner aggregates, pricing tiers, and price bands
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use types::*;
