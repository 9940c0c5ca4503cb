//! Tier classification against the global price quantiles.
//!
//! The thresholds come from the row-level prices of the current working
//! set, never from the unfiltered input, so classifications may shift as
//! filters are toggled.

use pricing_core::{PartnerAggregate, PriceBands, WorkingSet};
use tracing::debug;

use crate::stats;

/// Compute the P25/P75 bands over the row-level prices of the given set.
///
/// `None` only for an empty set, which the pipeline rejects before
/// classification runs.
pub fn price_bands(set: &WorkingSet) -> Option<PriceBands> {
    let prices = set.unit_prices();
    Some(PriceBands {
        p25: stats::quantile(&prices, 0.25)?,
        p75: stats::quantile(&prices, 0.75)?,
    })
}

/// Label every aggregate by comparing its median price to the bands.
pub fn classify_partners(
    aggregates: Vec<PartnerAggregate>,
    bands: &PriceBands,
) -> Vec<PartnerAggregate> {
    let classified: Vec<PartnerAggregate> = aggregates
        .into_iter()
        .map(|mut aggregate| {
            aggregate.tier = bands.classify(aggregate.median_price);
            aggregate
        })
        .collect();
    debug!(
        partners = classified.len(),
        p25 = bands.p25,
        p75 = bands.p75,
        "classified partners"
    );
    classified
}
