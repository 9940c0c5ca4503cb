//! Partner aggregation over the final working set.
//!
//! Aggregates are derived wholesale from the current set on every run;
//! nothing is updated incrementally.

use indexmap::IndexMap;
use pricing_core::{CleanRecord, Error, PartnerAggregate, Result, Tier, WorkingSet};
use tracing::debug;

use crate::stats;

/// Group the working set by partner, in first-seen order, and compute the
/// per-partner market statistics.
///
/// Tiers start at the `Mainstream` default; the classifier assigns the
/// final label against the global price bands. Fails on an empty set; the
/// pipeline checks emptiness after every filter, so an empty set never
/// reaches the middle of a computation.
pub fn aggregate_partners(set: &WorkingSet) -> Result<Vec<PartnerAggregate>> {
    if set.is_empty() {
        return Err(Error::empty_result("aggregation"));
    }

    let mut groups: IndexMap<&str, Vec<&CleanRecord>> = IndexMap::new();
    for record in set.iter() {
        groups.entry(record.partner.as_str()).or_default().push(record);
    }

    let aggregates: Vec<PartnerAggregate> = groups
        .into_iter()
        .map(|(partner, records)| {
            let prices: Vec<f64> = records.iter().map(|r| r.unit_price).collect();
            PartnerAggregate {
                partner: partner.to_string(),
                median_price: stats::median(&prices).unwrap_or_default(),
                total_quantity: records.iter().map(|r| r.quantity).sum(),
                total_revenue: records.iter().map(|r| r.line_revenue).sum(),
                order_count: records.len() as u32,
                tier: Tier::default(),
            }
        })
        .collect();

    debug!(partners = aggregates.len(), rows = set.len(), "aggregated partners");
    Ok(aggregates)
}
