//! The analysis pipeline driver.
//!
//! One deterministic, synchronous run per parameter change: normalize,
//! clean, filter, aggregate, classify, rank. Every derived stage recomputes
//! from the current working set; the only cached state is the parsed raw
//! table owned by the caller's `TableCache`.

use pricing_analytics::{
    aggregate_partners, bottom_by_price, classify_partners, filter_min_partner_revenue,
    filter_partner_allowlist, filter_price_outliers, price_bands, price_distributions,
    top_by_price, MarketSummary,
};
use pricing_core::{
    AnalysisConfig, Error, PartnerAggregate, PartnerPrices, PriceBands, Result, WorkingSet,
};
use pricing_ingestion::{clean, normalize, AliasTable, RawTable};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything one run hands to the display collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Per-partner statistics in aggregator (first-seen) order.
    pub aggregates: Vec<PartnerAggregate>,
    /// Tier thresholds used for classification.
    pub bands: PriceBands,
    /// Scalar summary panel values.
    pub summary: MarketSummary,
    /// Top-N partners by median price.
    pub top_by_price: Vec<PartnerAggregate>,
    /// Bottom-N partners by median price.
    pub bottom_by_price: Vec<PartnerAggregate>,
    /// Box-plot feed: row-level prices of the highest-volume partners.
    pub price_distributions: Vec<PartnerPrices>,
}

/// Pipeline driver owning one run configuration.
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    aliases: AliasTable,
}

impl AnalysisPipeline {
    /// Create a pipeline after validating the configuration.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let aliases = AliasTable::with_extensions(&config.schema);
        Ok(Self { config, aliases })
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full pipeline over one parsed table.
    ///
    /// Emptiness is checked after cleaning and after each filter stage, so
    /// aggregation never starts on an empty set.
    pub fn run(&self, table: &RawTable) -> Result<AnalysisReport> {
        let normalized = normalize(table, &self.aliases)?;
        let set = clean(&normalized)?;

        let set = if self.config.filter.enable_outlier_filter {
            ensure_non_empty(filter_price_outliers(&set), "outlier filter")?
        } else {
            set
        };
        let set = ensure_non_empty(
            filter_min_partner_revenue(&set, self.config.filter.min_partner_revenue),
            "revenue threshold filter",
        )?;
        let set = ensure_non_empty(
            filter_partner_allowlist(&set, &self.config.filter.partner_allowlist),
            "partner selection",
        )?;

        let aggregates = aggregate_partners(&set)?;
        let bands =
            price_bands(&set).ok_or_else(|| Error::empty_result("tier classification"))?;
        let aggregates = classify_partners(aggregates, &bands);

        let report = AnalysisReport {
            summary: MarketSummary::compute(&set, &aggregates, &bands),
            top_by_price: top_by_price(&aggregates, self.config.ranking.top_n),
            bottom_by_price: bottom_by_price(&aggregates, self.config.ranking.top_n),
            price_distributions: price_distributions(
                &set,
                &aggregates,
                self.config.ranking.box_plot_top_k,
            ),
            bands,
            aggregates,
        };
        debug!(
            partners = report.aggregates.len(),
            rows = set.len(),
            "analysis run complete"
        );
        Ok(report)
    }
}

/// Surface an `EmptyResult` naming the stage when the set has emptied.
fn ensure_non_empty(set: WorkingSet, stage: &str) -> Result<WorkingSet> {
    if set.is_empty() {
        Err(Error::empty_result(stage))
    } else {
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricing_core::Tier;

    const SCENARIO_CSV: &[u8] = b"\
Partner,Price,Qty
X,100,10
X,120,5
Y,50,100
";

    fn pipeline(configure: impl FnOnce(&mut AnalysisConfig)) -> AnalysisPipeline {
        let mut config = AnalysisConfig::default();
        configure(&mut config);
        AnalysisPipeline::new(config).unwrap()
    }

    fn scenario_table() -> RawTable {
        RawTable::from_csv_bytes(SCENARIO_CSV).unwrap()
    }

    #[test]
    fn test_full_run_over_known_table() {
        let pipeline = pipeline(|config| {
            config.filter.enable_outlier_filter = false;
            config.filter.min_partner_revenue = 0.0;
        });
        let report = pipeline.run(&scenario_table()).unwrap();

        assert_eq!(report.aggregates.len(), 2);
        let x = &report.aggregates[0];
        assert_eq!(x.partner, "X");
        assert_relative_eq!(x.median_price, 110.0);
        assert_relative_eq!(x.total_quantity, 15.0);
        assert_relative_eq!(x.total_revenue, 2600.0);
        assert_eq!(x.order_count, 2);
        let y = &report.aggregates[1];
        assert_eq!(y.partner, "Y");
        assert_relative_eq!(y.median_price, 50.0);
        assert_relative_eq!(y.total_revenue, 5000.0);

        // Bands over [100, 120, 50]: X sits on P75, Y below P25.
        assert_relative_eq!(report.bands.p25, 75.0);
        assert_relative_eq!(report.bands.p75, 110.0);
        assert_eq!(x.tier, Tier::High);
        assert_eq!(y.tier, Tier::Low);

        assert_relative_eq!(report.summary.weighted_avg_price, 6600.0 / 115.0);
    }

    #[test]
    fn test_revenue_threshold_can_empty_the_set() {
        // X totals 2600 and Y totals 5000; a 6000 threshold drops both.
        let pipeline = pipeline(|config| {
            config.filter.enable_outlier_filter = false;
            config.filter.min_partner_revenue = 6000.0;
        });
        let err = pipeline.run(&scenario_table()).unwrap_err();
        assert!(err.is_empty_result());
        assert!(err.to_string().contains("revenue threshold"));
    }

    #[test]
    fn test_allowlist_to_unknown_partner_is_empty_result() {
        let pipeline = pipeline(|config| {
            config.filter.enable_outlier_filter = false;
            config.filter.min_partner_revenue = 0.0;
            config.filter.partner_allowlist = vec!["Atlantis".to_string()];
        });
        let err = pipeline.run(&scenario_table()).unwrap_err();
        assert!(err.is_empty_result());
        assert!(err.to_string().contains("partner selection"));
    }

    #[test]
    fn test_allowlist_restricts_aggregates() {
        let pipeline = pipeline(|config| {
            config.filter.enable_outlier_filter = false;
            config.filter.min_partner_revenue = 0.0;
            config.filter.partner_allowlist = vec!["Y".to_string()];
        });
        let report = pipeline.run(&scenario_table()).unwrap();
        assert_eq!(report.aggregates.len(), 1);
        assert_eq!(report.aggregates[0].partner, "Y");
    }

    #[test]
    fn test_outlier_toggle_changes_the_surviving_set() {
        let csv = b"\
Partner,Price,Qty
A,10,1
A,11,1
B,12,1
B,13,1
C,100,1
";
        let table = RawTable::from_csv_bytes(csv).unwrap();

        let with_filter = pipeline(|config| {
            config.filter.min_partner_revenue = 0.0;
        });
        let report = with_filter.run(&table).unwrap();
        assert_eq!(report.summary.record_count, 4);
        assert!(report.aggregates.iter().all(|a| a.partner != "C"));

        let without_filter = pipeline(|config| {
            config.filter.enable_outlier_filter = false;
            config.filter.min_partner_revenue = 0.0;
        });
        let report = without_filter.run(&table).unwrap();
        assert_eq!(report.summary.record_count, 5);
    }

    #[test]
    fn test_aliases_resolve_end_to_end() {
        let csv = b"\
trade partner name, price per ton ,second quantity
Vietnam,75,40
";
        let table = RawTable::from_csv_bytes(csv).unwrap();
        let pipeline = pipeline(|config| {
            config.filter.min_partner_revenue = 0.0;
        });
        let report = pipeline.run(&table).unwrap();
        assert_eq!(report.aggregates[0].partner, "Vietnam");
        assert_relative_eq!(report.aggregates[0].median_price, 75.0);
    }

    #[test]
    fn test_default_revenue_threshold_drops_sample_orders() {
        // Y clears the default 10000 threshold, X (2600) does not.
        let pipeline = pipeline(|config| {
            config.filter.enable_outlier_filter = false;
            config.filter.min_partner_revenue = 5000.0;
        });
        let report = pipeline.run(&scenario_table()).unwrap();
        assert_eq!(report.aggregates.len(), 1);
        assert_eq!(report.aggregates[0].partner, "Y");
    }

    #[test]
    fn test_rankings_and_distributions_are_populated() {
        let pipeline = pipeline(|config| {
            config.filter.enable_outlier_filter = false;
            config.filter.min_partner_revenue = 0.0;
            config.ranking.top_n = 1;
            config.ranking.box_plot_top_k = 1;
        });
        let report = pipeline.run(&scenario_table()).unwrap();
        assert_eq!(report.top_by_price.len(), 1);
        assert_eq!(report.top_by_price[0].partner, "X");
        assert_eq!(report.bottom_by_price[0].partner, "Y");
        // Y carries the largest volume, so it is the box-plot feed.
        assert_eq!(report.price_distributions.len(), 1);
        assert_eq!(report.price_distributions[0].partner, "Y");
        assert_eq!(report.price_distributions[0].unit_prices, vec![50.0]);
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let mut config = AnalysisConfig::default();
        config.filter.min_partner_revenue = -10.0;
        assert!(AnalysisPipeline::new(config).is_err());
    }
}
