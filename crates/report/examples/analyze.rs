//! Run the full analysis pipeline over a local file and print the report.
//!
//! Usage: cargo run --example analyze -- path/to/trades.csv

use anyhow::{bail, Context};
use pricing_core::AnalysisConfig;
use pricing_ingestion::TableCache;
use pricing_report::{export_aggregates_csv, AnalysisPipeline};
use tracing::warn;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: analyze <trades.csv|trades.xlsx>");
    };
    let bytes = std::fs::read(&path).with_context(|| format!("reading {path}"))?;
    let file_name = std::path::Path::new(&path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path.as_str())
        .to_string();

    let mut cache = TableCache::new();
    let table = cache.load(&file_name, &bytes)?;

    let pipeline = AnalysisPipeline::new(AnalysisConfig::default())?;
    let report = match pipeline.run(table) {
        Ok(report) => report,
        Err(err) if err.is_empty_result() => {
            warn!(%err, "no rows survived the filters; loosen them and retry");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let summary = &report.summary;
    println!(
        "partners: {}  records: {}",
        summary.partner_count, summary.record_count
    );
    println!("weighted avg price: {:.2}", summary.weighted_avg_price);
    println!("P25 / P75: {:.2} / {:.2}", summary.p25, summary.p75);
    println!();
    println!("top partners by median price:");
    for aggregate in &report.top_by_price {
        println!(
            "  {:<24} {:>10.2}  [{}]",
            aggregate.partner, aggregate.median_price, aggregate.tier
        );
    }
    println!();
    println!("bottom partners by median price:");
    for aggregate in &report.bottom_by_price {
        println!(
            "  {:<24} {:>10.2}  [{}]",
            aggregate.partner, aggregate.median_price, aggregate.tier
        );
    }

    let csv_bytes = export_aggregates_csv(&report.aggregates)?;
    let out_path = format!("{path}.analysis.csv");
    std::fs::write(&out_path, csv_bytes)?;
    println!("\nwrote {out_path}");
    Ok(())
}
