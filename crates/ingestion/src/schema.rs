//! Schema normalization: mapping arbitrary column names onto the canonical
//! field set.
//!
//! Column names are trimmed and resolved (case-sensitive, exact) against a
//! typed alias table. Resolution is a pure lookup: a name maps to a
//! canonical field or stays unmatched, and a table whose columns are
//! already canonical normalizes to itself.

use pricing_core::config::SchemaConfig;
use pricing_core::{CanonicalField, Error, Result};
use tracing::debug;

use crate::reader::RawTable;

/// Built-in aliases resolving to `unit_price`.
const PRICE_ALIASES: [&str; 6] = [
    "unit price per ton",
    "price per ton",
    "unit price",
    "price",
    "Price",
    "Unit Price",
];

/// Built-in aliases resolving to `quantity`.
const QUANTITY_ALIASES: [&str; 5] =
    ["second quantity", "quantity", "Qty", "Quantity", "Sales Qty"];

/// Built-in aliases resolving to `partner`.
const PARTNER_ALIASES: [&str; 4] = ["trade partner name", "country", "Country", "Partner"];

/// Built-in aliases resolving to the optional `amount`.
const AMOUNT_ALIASES: [&str; 5] =
    ["amount", "total amount", "trade value", "Amount", "Total Value"];

/// Alias table keyed by canonical field.
#[derive(Debug, Clone)]
pub struct AliasTable {
    price: Vec<String>,
    quantity: Vec<String>,
    partner: Vec<String>,
    amount: Vec<String>,
}

impl AliasTable {
    /// Table holding the built-in aliases only.
    pub fn new() -> Self {
        let collect = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            price: collect(&PRICE_ALIASES),
            quantity: collect(&QUANTITY_ALIASES),
            partner: collect(&PARTNER_ALIASES),
            amount: collect(&AMOUNT_ALIASES),
        }
    }

    /// Table holding the built-in aliases plus configured extensions.
    pub fn with_extensions(config: &SchemaConfig) -> Self {
        let mut table = Self::new();
        table.price.extend(config.extra_price_aliases.iter().cloned());
        table
            .quantity
            .extend(config.extra_quantity_aliases.iter().cloned());
        table
            .partner
            .extend(config.extra_partner_aliases.iter().cloned());
        table
            .amount
            .extend(config.extra_amount_aliases.iter().cloned());
        table
    }

    /// Aliases for one canonical field.
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        match field {
            CanonicalField::UnitPrice => &self.price,
            CanonicalField::Quantity => &self.quantity,
            CanonicalField::Partner => &self.partner,
            CanonicalField::Amount => &self.amount,
        }
    }

    /// Resolve a raw column name to a canonical field.
    ///
    /// The name is trimmed first. The canonical name itself always resolves,
    /// then the field's alias set is searched with exact, case-sensitive
    /// comparison.
    pub fn resolve(&self, raw_name: &str) -> Option<CanonicalField> {
        let name = raw_name.trim();
        const FIELDS: [CanonicalField; 4] = [
            CanonicalField::UnitPrice,
            CanonicalField::Quantity,
            CanonicalField::Partner,
            CanonicalField::Amount,
        ];
        FIELDS.into_iter().find(|&field| {
            name == field.name() || self.aliases(field).iter().any(|a| a == name)
        })
    }

    /// Every name the resolver accepts, for schema error reporting.
    fn searched_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for field in [
            CanonicalField::UnitPrice,
            CanonicalField::Quantity,
            CanonicalField::Partner,
            CanonicalField::Amount,
        ] {
            names.push(field.name().to_string());
            names.extend(self.aliases(field).iter().cloned());
        }
        names
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolved column indices for the canonical fields.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    unit_price: usize,
    quantity: usize,
    partner: usize,
    amount: Option<usize>,
}

/// A raw table with its columns renamed onto the canonical schema.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    map: ColumnMap,
}

/// The canonical cells of one normalized row.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedRow<'a> {
    /// Trading partner cell.
    pub partner: &'a str,
    /// Unit price cell, still unparsed.
    pub unit_price: &'a str,
    /// Quantity cell, still unparsed.
    pub quantity: &'a str,
    /// Declared amount cell, when the column resolved.
    pub amount: Option<&'a str>,
}

impl NormalizedTable {
    /// Column names after renaming: canonical names where a column resolved,
    /// the trimmed original name otherwise.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the optional monetary-amount column resolved.
    pub fn has_amount(&self) -> bool {
        self.map.amount.is_some()
    }

    /// Iterate the canonical cells of every row.
    ///
    /// Rows shorter than the header yield empty cells, which the cleaner
    /// treats as missing.
    pub fn rows(&self) -> impl Iterator<Item = NormalizedRow<'_>> {
        let map = self.map;
        self.rows.iter().map(move |row| {
            let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");
            NormalizedRow {
                partner: cell(map.partner),
                unit_price: cell(map.unit_price),
                quantity: cell(map.quantity),
                amount: map.amount.map(cell),
            }
        })
    }
}

/// Normalize a raw table's columns onto the canonical schema.
///
/// Fails with a `Schema` error naming the missing canonical fields and the
/// full list of searched names when any required field is unresolved. The
/// first matching column wins when duplicates resolve to the same field.
pub fn normalize(table: &RawTable, aliases: &AliasTable) -> Result<NormalizedTable> {
    let mut columns = Vec::with_capacity(table.columns().len());
    let mut unit_price = None;
    let mut quantity = None;
    let mut partner = None;
    let mut amount = None;

    for (idx, raw_name) in table.columns().iter().enumerate() {
        match aliases.resolve(raw_name) {
            Some(field) => {
                columns.push(field.name().to_string());
                let slot = match field {
                    CanonicalField::UnitPrice => &mut unit_price,
                    CanonicalField::Quantity => &mut quantity,
                    CanonicalField::Partner => &mut partner,
                    CanonicalField::Amount => &mut amount,
                };
                if slot.is_none() {
                    *slot = Some(idx);
                }
            }
            None => columns.push(raw_name.trim().to_string()),
        }
    }

    let mut missing = Vec::new();
    for (field, slot) in [
        (CanonicalField::UnitPrice, unit_price),
        (CanonicalField::Quantity, quantity),
        (CanonicalField::Partner, partner),
    ] {
        if slot.is_none() {
            missing.push(field.name().to_string());
        }
    }
    if !missing.is_empty() {
        return Err(Error::schema(missing, aliases.searched_names()));
    }

    let map = ColumnMap {
        unit_price: unit_price.unwrap_or_default(),
        quantity: quantity.unwrap_or_default(),
        partner: partner.unwrap_or_default(),
        amount,
    };
    debug!(
        rows = table.row_count(),
        has_amount = map.amount.is_some(),
        "normalized schema"
    );

    Ok(NormalizedTable {
        columns,
        rows: table.rows().to_vec(),
        map,
    })
}
