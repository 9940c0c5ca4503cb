//! Core data types for the pricing analytics pipeline.

use serde::{Deserialize, Serialize};

/// Canonical logical fields of the normalized input schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    /// Per-unit transaction price.
    UnitPrice,
    /// Transaction quantity.
    Quantity,
    /// Trading partner name.
    Partner,
    /// Pre-computed monetary amount (optional in the input).
    Amount,
}

impl CanonicalField {
    /// Fields that must resolve for a table to be usable.
    pub const REQUIRED: [CanonicalField; 3] =
        [Self::UnitPrice, Self::Quantity, Self::Partner];

    /// Canonical column name.
    pub fn name(self) -> &'static str {
        match self {
            Self::UnitPrice => "unit_price",
            Self::Quantity => "quantity",
            Self::Partner => "partner",
            Self::Amount => "amount",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pricing tier assigned to a partner aggregate.
///
/// Presentation (glyphs, colors) is owned by the rendering collaborator;
/// core logic only ever compares the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Median price at or below the global P25.
    Low,
    /// Median price between the quantile thresholds.
    #[default]
    Mainstream,
    /// Median price at or above the global P75.
    High,
}

impl Tier {
    /// Stable lower-case name used in exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mainstream => "mainstream",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Global price quantile thresholds used for tier classification.
///
/// Always recomputed from the current working set, never frozen from the
/// unfiltered input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBands {
    /// 25th percentile of row-level unit prices.
    pub p25: f64,
    /// 75th percentile of row-level unit prices.
    pub p75: f64,
}

impl PriceBands {
    /// Classify a partner's median price against the bands.
    ///
    /// High is evaluated before Low: a degenerate distribution where the
    /// median sits on both thresholds classifies High.
    pub fn classify(&self, median_price: f64) -> Tier {
        if median_price >= self.p75 {
            Tier::High
        } else if median_price <= self.p25 {
            Tier::Low
        } else {
            Tier::Mainstream
        }
    }
}

/// A single cleaned transaction row.
///
/// Immutable once created; records leave the pipeline only through
/// set-level filtering, never by in-place edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanRecord {
    /// Trading partner name.
    pub partner: String,
    /// Per-unit price; always positive.
    pub unit_price: f64,
    /// Quantity; always positive.
    pub quantity: f64,
    /// `unit_price * quantity`, computed once at construction.
    pub line_revenue: f64,
    /// Monetary amount declared in the input, when the column was present.
    pub declared_amount: Option<f64>,
}

impl CleanRecord {
    /// Create a record, deriving `line_revenue` from price and quantity.
    pub fn new(
        partner: impl Into<String>,
        unit_price: f64,
        quantity: f64,
        declared_amount: Option<f64>,
    ) -> Self {
        Self {
            partner: partner.into(),
            unit_price,
            quantity,
            line_revenue: unit_price * quantity,
            declared_amount,
        }
    }

    /// Revenue used in volume-weighted computations.
    ///
    /// Prefers the declared amount over the derived line revenue.
    #[inline]
    pub fn weighting_revenue(&self) -> f64 {
        self.declared_amount.unwrap_or(self.line_revenue)
    }
}

/// Ordered collection of cleaned records alive after the filters applied
/// so far.
///
/// Each filter stage consumes one working set and produces a new one that
/// is never larger; no stage invents records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkingSet {
    records: Vec<CleanRecord>,
}

impl WorkingSet {
    /// Create a working set from cleaned records.
    pub fn new(records: Vec<CleanRecord>) -> Self {
        Self { records }
    }

    /// Records in set order.
    pub fn records(&self) -> &[CleanRecord] {
        &self.records
    }

    /// Iterate over records in set order.
    pub fn iter(&self) -> std::slice::Iter<'_, CleanRecord> {
        self.records.iter()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records survive.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// New working set keeping only records that satisfy the predicate.
    pub fn filtered(&self, mut keep: impl FnMut(&CleanRecord) -> bool) -> WorkingSet {
        WorkingSet {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Row-level unit prices in set order.
    pub fn unit_prices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.unit_price).collect()
    }

    /// Sum of quantities over the set.
    pub fn total_quantity(&self) -> f64 {
        self.records.iter().map(|r| r.quantity).sum()
    }

    /// Sum of line revenues over the set.
    pub fn total_revenue(&self) -> f64 {
        self.records.iter().map(|r| r.line_revenue).sum()
    }
}

/// Per-partner market statistics derived from the final working set.
///
/// Recomputed wholesale whenever the working set changes; never updated
/// incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerAggregate {
    /// Trading partner name.
    pub partner: String,
    /// Median of the partner's row-level unit prices.
    pub median_price: f64,
    /// Sum of the partner's quantities.
    pub total_quantity: f64,
    /// Sum of the partner's line revenues.
    pub total_revenue: f64,
    /// Number of rows for the partner.
    pub order_count: u32,
    /// Pricing tier relative to the global price bands.
    pub tier: Tier,
}

/// One partner's row-level unit prices, for the external box-plot
/// collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerPrices {
    /// Trading partner name.
    pub partner: String,
    /// Row-level unit prices in set order.
    pub unit_prices: Vec<f64>,
}
