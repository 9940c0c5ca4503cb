//! Market statistics for the pricing analytics pipeline.
//!
//! This crate handles:
//! - Working-set filters (IQR outlier, revenue threshold, allow-list)
//! - Partner aggregation and tier classification
//! - Rankings and distribution feeds for the display collaborators
//! - The scalar summary panel values

pub mod aggregate;
pub mod filters;
pub mod ranking;
pub mod stats;
pub mod summary;
pub mod tier;

pub use aggregate::aggregate_partners;
pub use filters::{
    filter_min_partner_revenue, filter_partner_allowlist, filter_price_outliers, OutlierBounds,
};
pub use ranking::{bottom_by_price, price_distributions, top_by_price, weighted_average_price};
pub use summary::MarketSummary;
pub use tier::{classify_partners, price_bands};
