use crate::aggregator::Period;
use crate::output::read_report;
use crate::utils::config::{HIERARCHY_ROOT_NAME, SCHEMA_VERSION};
use anyhow::Result;
use std::path::PathBuf;

/// Validate a report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    if report.series.labels.len() != report.series.values.len() {
        anyhow::bail!(
            "Series is misaligned: {} labels but {} values",
            report.series.labels.len(),
            report.series.values.len()
        );
    }

    let tree_names = report.hierarchy.children.iter().map(|c| c.name.as_str());
    if !tree_names.eq(report.series.iter().map(|(label, _)| label)) {
        anyhow::bail!("Series labels and hierarchy children are not in the same order");
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Period: {}", report.period);
    println!(
        "  Records: {} ({} skipped, {} with invalid timestamps)",
        report.total_records, report.skipped_records, report.invalid_timestamps
    );
    println!("  Buckets: {}", report.series.len());
    println!("  Total Volume: {:.2}", report.summary.total_volume);
    println!("  Total Notional: {:.2}", report.hierarchy.total_value());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Trade Bucket Studio Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!(
        "Periods: {}",
        Period::ALL.iter().map(Period::name).collect::<Vec<_>>().join(", ")
    );
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  period: string           - daily | weekly | monthly | quarterly");
        println!("  generated_at: string     - ISO 8601 timestamp");
        println!("  total_records: number    - Records placed in a bucket");
        println!("  skipped_records: number  - Records rejected while parsing");
        println!("  invalid_timestamps: number - Rejected for an unparseable timestamp");
        println!("  summary: object          - Totals across all buckets");
        println!("  series: object           - Bar chart data");
        println!("    labels: string[]       - Bucket keys, oldest first");
        println!("    values: number[]       - Volume per bucket");
        println!("  hierarchy: object        - Treemap data");
        println!("    name: string           - Always '{}'", HIERARCHY_ROOT_NAME);
        println!("    children: array        - One node per bucket, oldest first");
        println!("      name: string         - Bucket key");
        println!("      value: number        - Notional (size × price)");
        println!("      color: string        - Palette color derived from the key");
        println!();
        println!("Bucket keys:");
        println!("  daily      2023-01-05");
        println!("  weekly     2023-01-01   (Sunday starting the week)");
        println!("  monthly    2023-1");
        println!("  quarterly  2023-Q1");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Trade Bucket Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Calendar bucketing of trade records into volume and notional charts.");
}
