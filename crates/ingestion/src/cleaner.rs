//! Record cleaning: numeric coercion, structural filtering, and revenue
//! derivation.
//!
//! A cell that fails numeric parsing makes the row missing data rather than
//! raising an error; such rows are dropped one by one. Cleaning fails only
//! when nothing at all survives.

use pricing_core::{CleanRecord, Error, Result, WorkingSet};
use tracing::debug;

use crate::schema::NormalizedTable;

/// Coerce a numeric cell; `None` means missing.
fn parse_numeric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Clean a normalized table into the initial working set.
///
/// Drops rows whose price or quantity is missing or non-positive, or whose
/// partner cell is blank, then derives `line_revenue` for every survivor.
/// The optional declared amount is coerced the same way but a failed parse
/// only leaves it unset.
pub fn clean(table: &NormalizedTable) -> Result<WorkingSet> {
    let mut records = Vec::with_capacity(table.row_count());
    let mut dropped = 0usize;

    for row in table.rows() {
        let (Some(unit_price), Some(quantity)) =
            (parse_numeric(row.unit_price), parse_numeric(row.quantity))
        else {
            dropped += 1;
            continue;
        };
        if unit_price <= 0.0 || quantity <= 0.0 {
            dropped += 1;
            continue;
        }
        let partner = row.partner.trim();
        if partner.is_empty() {
            dropped += 1;
            continue;
        }
        let declared_amount = row.amount.and_then(parse_numeric);
        records.push(CleanRecord::new(partner, unit_price, quantity, declared_amount));
    }

    debug!(kept = records.len(), dropped, "cleaned records");
    if records.is_empty() {
        return Err(Error::empty_result("record cleaning"));
    }
    Ok(WorkingSet::new(records))
}
