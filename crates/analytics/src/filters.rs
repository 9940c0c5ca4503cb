//! Working-set filters: IQR outlier trimming, revenue thresholding, and the
//! partner allow-list.
//!
//! Each filter is a pure function from one working set to a new, never
//! larger one. Bounds and per-partner totals are derived from the set
//! handed in, once; nothing re-trims recursively.

use std::collections::{HashMap, HashSet};

use pricing_core::WorkingSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats;

/// Multiplier applied to the IQR when deriving the outlier bounds.
const IQR_MULTIPLIER: f64 = 1.5;

/// Inclusive price bounds derived from the quartiles of a working set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    /// `Q1 - 1.5 * IQR`.
    pub lower: f64,
    /// `Q3 + 1.5 * IQR`.
    pub upper: f64,
}

impl OutlierBounds {
    /// Derive bounds from the row-level prices of the given set.
    ///
    /// `None` for an empty set.
    pub fn from_working_set(set: &WorkingSet) -> Option<Self> {
        let prices = set.unit_prices();
        let q1 = stats::quantile(&prices, 0.25)?;
        let q3 = stats::quantile(&prices, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            lower: q1 - IQR_MULTIPLIER * iqr,
            upper: q3 + IQR_MULTIPLIER * iqr,
        })
    }

    /// Whether a price lies inside the bounds, inclusive on both ends.
    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        self.lower <= price && price <= self.upper
    }
}

/// Drop rows whose unit price falls outside the IQR bounds of `set`.
pub fn filter_price_outliers(set: &WorkingSet) -> WorkingSet {
    let Some(bounds) = OutlierBounds::from_working_set(set) else {
        return set.clone();
    };
    let kept = set.filtered(|r| bounds.contains(r.unit_price));
    debug!(
        before = set.len(),
        after = kept.len(),
        lower = bounds.lower,
        upper = bounds.upper,
        "applied outlier filter"
    );
    kept
}

/// Keep rows of partners whose summed line revenue is at least
/// `min_revenue`.
///
/// The threshold is inclusive: a partner exactly at it survives.
pub fn filter_min_partner_revenue(set: &WorkingSet, min_revenue: f64) -> WorkingSet {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for record in set.iter() {
        *totals.entry(record.partner.as_str()).or_insert(0.0) += record.line_revenue;
    }
    let kept = set.filtered(|r| {
        totals.get(r.partner.as_str()).copied().unwrap_or(0.0) >= min_revenue
    });
    debug!(
        before = set.len(),
        after = kept.len(),
        min_revenue,
        "applied revenue threshold"
    );
    kept
}

/// Restrict to partners on the allow-list.
///
/// An empty list is the absence of the filter, not a filter-to-nothing:
/// the set passes through unchanged.
pub fn filter_partner_allowlist(set: &WorkingSet, allowlist: &[String]) -> WorkingSet {
    if allowlist.is_empty() {
        return set.clone();
    }
    let allowed: HashSet<&str> = allowlist.iter().map(String::as_str).collect();
    let kept = set.filtered(|r| allowed.contains(r.partner.as_str()));
    debug!(
        before = set.len(),
        after = kept.len(),
        allowed = allowlist.len(),
        "applied partner allow-list"
    );
    kept
}
