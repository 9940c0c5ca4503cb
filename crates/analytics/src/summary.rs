//! Market summary panel values.
//!
//! Scalar descriptive statistics handed to the dashboard shell: a price
//! panel, a volume panel, and a revenue panel, all derived from the final
//! working set and its aggregates.

use pricing_core::{PartnerAggregate, PriceBands, WorkingSet};
use serde::{Deserialize, Serialize};

use crate::ranking::weighted_average_price;
use crate::stats;

/// Scalar summary values for one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSummary {
    /// Volume-weighted average unit price.
    pub weighted_avg_price: f64,
    /// Median row-level unit price.
    pub median_price: f64,
    /// Highest row-level unit price.
    pub max_price: f64,
    /// Low-tier threshold (global P25).
    pub p25: f64,
    /// High-tier threshold (global P75).
    pub p75: f64,
    /// Total quantity over all rows.
    pub total_quantity: f64,
    /// Mean quantity per order.
    pub mean_order_quantity: f64,
    /// Largest single-order quantity.
    pub max_order_quantity: f64,
    /// Mean of the per-partner total quantities.
    pub mean_partner_quantity: f64,
    /// Largest per-partner total quantity.
    pub max_partner_quantity: f64,
    /// Total revenue over all rows.
    pub total_revenue: f64,
    /// Mean revenue per order.
    pub mean_order_revenue: f64,
    /// Largest single-order revenue.
    pub max_order_revenue: f64,
    /// Mean of the per-partner total revenues.
    pub mean_partner_revenue: f64,
    /// Largest per-partner total revenue.
    pub max_partner_revenue: f64,
    /// Surviving record count.
    pub record_count: usize,
    /// Surviving partner count.
    pub partner_count: usize,
}

impl MarketSummary {
    /// Compute the summary from the final working set and its aggregates.
    pub fn compute(
        set: &WorkingSet,
        aggregates: &[PartnerAggregate],
        bands: &PriceBands,
    ) -> Self {
        let prices = set.unit_prices();
        let quantities: Vec<f64> = set.iter().map(|r| r.quantity).collect();
        let revenues: Vec<f64> = set.iter().map(|r| r.line_revenue).collect();
        let partner_quantities: Vec<f64> =
            aggregates.iter().map(|a| a.total_quantity).collect();
        let partner_revenues: Vec<f64> =
            aggregates.iter().map(|a| a.total_revenue).collect();

        Self {
            weighted_avg_price: weighted_average_price(set),
            median_price: stats::median(&prices).unwrap_or_default(),
            max_price: stats::max(&prices).unwrap_or_default(),
            p25: bands.p25,
            p75: bands.p75,
            total_quantity: set.total_quantity(),
            mean_order_quantity: stats::mean(&quantities).unwrap_or_default(),
            max_order_quantity: stats::max(&quantities).unwrap_or_default(),
            mean_partner_quantity: stats::mean(&partner_quantities).unwrap_or_default(),
            max_partner_quantity: stats::max(&partner_quantities).unwrap_or_default(),
            total_revenue: set.total_revenue(),
            mean_order_revenue: stats::mean(&revenues).unwrap_or_default(),
            max_order_revenue: stats::max(&revenues).unwrap_or_default(),
            mean_partner_revenue: stats::mean(&partner_revenues).unwrap_or_default(),
            max_partner_revenue: stats::max(&partner_revenues).unwrap_or_default(),
            record_count: set.len(),
            partner_count: aggregates.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricing_core::CleanRecord;

    #[test]
    fn test_summary_arithmetic() {
        let set = WorkingSet::new(vec![
            CleanRecord::new("X", 100.0, 10.0, None),
            CleanRecord::new("X", 120.0, 5.0, None),
            CleanRecord::new("Y", 50.0, 100.0, None),
        ]);
        let aggregates = crate::aggregate::aggregate_partners(&set).unwrap();
        let bands = crate::tier::price_bands(&set).unwrap();
        let summary = MarketSummary::compute(&set, &aggregates, &bands);

        assert_relative_eq!(summary.weighted_avg_price, 6600.0 / 115.0);
        assert_relative_eq!(summary.median_price, 100.0);
        assert_relative_eq!(summary.max_price, 120.0);
        assert_relative_eq!(summary.p25, 75.0);
        assert_relative_eq!(summary.p75, 110.0);
        assert_relative_eq!(summary.total_quantity, 115.0);
        assert_relative_eq!(summary.max_order_quantity, 100.0);
        assert_relative_eq!(summary.mean_partner_quantity, 57.5);
        assert_relative_eq!(summary.max_partner_quantity, 100.0);
        assert_relative_eq!(summary.total_revenue, 6600.0);
        assert_relative_eq!(summary.max_order_revenue, 5000.0);
        assert_relative_eq!(summary.mean_partner_revenue, 3300.0);
        assert_relative_eq!(summary.max_partner_revenue, 5000.0);
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.partner_count, 2);
    }
}
