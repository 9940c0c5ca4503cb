//! CSV export of the aggregates table.
//!
//! Encoded as UTF-8 with a byte-order mark so spreadsheet applications pick
//! the right encoding on open. Rows are written in aggregator order; any
//! display-side re-sorting belongs to the ranking feed, not the export.

use pricing_core::{PartnerAggregate, Result};

/// UTF-8 byte-order mark prefixed to the export.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Column order of the export.
const HEADER: [&str; 6] = [
    "partner",
    "median_price",
    "total_quantity",
    "total_revenue",
    "order_count",
    "tier",
];

/// Encode the aggregates table, one row per partner.
pub fn export_aggregates_csv(aggregates: &[PartnerAggregate]) -> Result<Vec<u8>> {
    let mut buf = Vec::from(UTF8_BOM);
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(HEADER)?;
        for aggregate in aggregates {
            writer.write_record([
                aggregate.partner.clone(),
                aggregate.median_price.to_string(),
                aggregate.total_quantity.to_string(),
                aggregate.total_revenue.to_string(),
                aggregate.order_count.to_string(),
                aggregate.tier.as_str().to_string(),
            ])?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricing_core::Tier;

    fn make_aggregate(partner: &str, median: f64, tier: Tier) -> PartnerAggregate {
        PartnerAggregate {
            partner: partner.to_string(),
            median_price: median,
            total_quantity: 15.0,
            total_revenue: 2600.0,
            order_count: 2,
            tier,
        }
    }

    #[test]
    fn test_export_starts_with_bom() {
        let bytes = export_aggregates_csv(&[]).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    }

    #[test]
    fn test_export_header_and_rows() {
        let aggregates = vec![
            make_aggregate("X", 110.0, Tier::High),
            make_aggregate("Y", 50.0, Tier::Low),
        ];
        let bytes = export_aggregates_csv(&aggregates).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "partner,median_price,total_quantity,total_revenue,order_count,tier"
        );
        assert_eq!(lines[1], "X,110,15,2600,2,high");
        assert_eq!(lines[2], "Y,50,15,2600,2,low");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_preserves_aggregator_order() {
        let aggregates = vec![
            make_aggregate("Zimbabwe", 1.0, Tier::Low),
            make_aggregate("Albania", 2.0, Tier::Low),
        ];
        let bytes = export_aggregates_csv(&aggregates).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("Zimbabwe,"));
        assert!(lines[2].starts_with("Albania,"));
    }

    #[test]
    fn test_partner_names_with_commas_are_quoted() {
        let aggregates = vec![make_aggregate("Korea, Rep.", 10.0, Tier::Mainstream)];
        let bytes = export_aggregates_csv(&aggregates).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("\"Korea, Rep.\","));
    }
}
