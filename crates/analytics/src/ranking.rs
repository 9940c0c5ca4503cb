//! Rankings and distribution feeds for the display collaborators.

use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use pricing_core::{PartnerAggregate, PartnerPrices, WorkingSet};

use crate::stats;

/// Volume-weighted average unit price over the working set.
///
/// Prefers each record's declared amount over the derived line revenue,
/// and returns `0` when the quantity sum is zero rather than dividing by
/// it.
pub fn weighted_average_price(set: &WorkingSet) -> f64 {
    let total_quantity = set.total_quantity();
    if total_quantity > 0.0 {
        let total_revenue: f64 = set.iter().map(|r| r.weighting_revenue()).sum();
        total_revenue / total_quantity
    } else {
        0.0
    }
}

/// First `n` aggregates by descending median price.
///
/// The sort is stable, so partners tied on price keep their first-seen
/// order.
pub fn top_by_price(aggregates: &[PartnerAggregate], n: usize) -> Vec<PartnerAggregate> {
    let mut ranked = aggregates.to_vec();
    ranked.sort_by_key(|a| Reverse(OrderedFloat(a.median_price)));
    ranked.truncate(n);
    ranked
}

/// First `n` aggregates by ascending median price, same tie-break.
pub fn bottom_by_price(aggregates: &[PartnerAggregate], n: usize) -> Vec<PartnerAggregate> {
    let mut ranked = aggregates.to_vec();
    ranked.sort_by_key(|a| OrderedFloat(a.median_price));
    ranked.truncate(n);
    ranked
}

/// Row-level price groups for the box-plot collaborator.
///
/// Restricts to the `top_k` partners by total quantity, then orders the
/// groups by descending median price. The ordering is part of the feed;
/// the renderer never computes it.
pub fn price_distributions(
    set: &WorkingSet,
    aggregates: &[PartnerAggregate],
    top_k: usize,
) -> Vec<PartnerPrices> {
    let mut by_volume = aggregates.to_vec();
    by_volume.sort_by_key(|a| Reverse(OrderedFloat(a.total_quantity)));
    by_volume.truncate(top_k);

    let mut keyed: Vec<(f64, PartnerPrices)> = by_volume
        .iter()
        .map(|aggregate| {
            let unit_prices: Vec<f64> = set
                .iter()
                .filter(|r| r.partner == aggregate.partner)
                .map(|r| r.unit_price)
                .collect();
            let median = stats::median(&unit_prices).unwrap_or_default();
            (
                median,
                PartnerPrices {
                    partner: aggregate.partner.clone(),
                    unit_prices,
                },
            )
        })
        .collect();
    keyed.sort_by_key(|(median, _)| Reverse(OrderedFloat(*median)));
    keyed.into_iter().map(|(_, group)| group).collect()
}
