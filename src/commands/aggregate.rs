//! Aggregate command implementation.
//!
//! The aggregate command:
//! 1. Reads the raw trade document
//! 2. Parses records, skipping malformed ones
//! 3. Buckets records by calendar period
//! 4. Reduces buckets to volume and notional
//! 5. Builds the series and hierarchy projections
//! 6. Writes output files

use super::models::AggregateArgs;
use crate::aggregator::{aggregate, calculate_volume_distribution, reduce_all, Period};
use crate::output::{generate_text_summary, write_projection, write_report};
use crate::parser::{parse_records, parse_timestamp, to_report, Report};
use crate::projection::build_projections;
use crate::source::load_raw_records;
use crate::utils::config::MAX_SUMMARY_ROWS;
use anyhow::{Context, Result};
use chrono::{DateTime, Months, Utc};
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the aggregate command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was written, so callers can inspect it
///
/// # Errors
/// * Unrecognized period (checked before any input is read)
/// * Unreadable or non-JSON input
/// * File write errors
pub fn execute_aggregate(args: AggregateArgs) -> Result<Report> {
    let start_time = Instant::now();

    // Configuration first: a bad period must not cost a read of the input
    let period: Period = args
        .period
        .parse()
        .with_context(|| format!("Invalid --period value '{}'", args.period))?;
    let cutoff = resolve_window_start(&args, Utc::now())?;

    info!("Aggregating trades by {} period", period);

    info!("Step 1/6: Reading trade records...");
    let raw = load_raw_records(args.input.as_deref()).context("Failed to read trade records")?;

    info!("Step 2/6: Parsing trade records...");
    let mut parsed = parse_records(&raw).context("Failed to parse trade records")?;

    if let Some(cutoff) = cutoff {
        let before = parsed.records.len();
        parsed.records.retain(|r| r.timestamp >= cutoff);
        info!(
            "Kept {} of {} records at or after {}",
            parsed.records.len(),
            before,
            cutoff.to_rfc3339()
        );
    }

    debug!(
        "Parsed {} records, skipped {}",
        parsed.records.len(),
        parsed.skipped.len()
    );

    info!("Step 3/6: Bucketing records...");
    let buckets = aggregate(&parsed.records, period);

    info!("Step 4/6: Reducing {} buckets...", buckets.len());
    let reduced = reduce_all(&buckets);
    let distribution = calculate_volume_distribution(&reduced);
    info!("Volume distribution: {}", distribution.summary());

    info!("Step 5/6: Building projections...");
    let projections = build_projections(&reduced);

    info!("Step 6/6: Writing output files...");
    let report = to_report(&parsed, period, distribution, projections);

    if let Some(path) = &args.output_json {
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    if let Some(path) = &args.output_series {
        write_projection(&report.series, path).context("Failed to write series JSON")?;
        info!("✓ Series written to: {}", path.display());
    }

    if let Some(path) = &args.output_tree {
        write_projection(&report.hierarchy, path).context("Failed to write hierarchy JSON")?;
        info!("✓ Hierarchy written to: {}", path.display());
    }

    if !parsed.skipped.is_empty() {
        warn!(
            "{} record(s) were skipped; see warnings above",
            parsed.skipped.len()
        );
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("TRADE SUMMARY ({})", period);
        println!("{}", "=".repeat(80));
        println!("Records:   {}", report.total_records);
        println!(
            "Skipped:   {} ({} invalid timestamps)",
            report.skipped_records, report.invalid_timestamps
        );
        println!("Buckets:   {}", report.summary.bucket_count);
        println!("Volume:    {:.2}", report.summary.total_volume);
        println!("Notional:  {:.2}", report.summary.total_notional);
        println!("\n{}", generate_text_summary(&reduced, args.summary_rows));
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Aggregation completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Earliest timestamp to keep, if a date window was requested
///
/// **Public** - `now` is a parameter so the window is testable
///
/// `--last-year` means exactly twelve calendar months before `now`.
/// Feb 29 clamps to Feb 28.
pub fn resolve_window_start(
    args: &AggregateArgs,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>> {
    if let Some(since) = &args.since {
        let cutoff = parse_timestamp(&serde_json::Value::String(since.clone()))
            .with_context(|| format!("Invalid --since value '{}'", since))?;
        return Ok(Some(cutoff));
    }

    if args.last_year {
        let cutoff = now
            .checked_sub_months(Months::new(12))
            .context("Cannot compute a date one year before now")?;
        return Ok(Some(cutoff));
    }

    Ok(None)
}

/// Validate aggregate arguments
///
/// **Public** - can be called before execute_aggregate for early validation
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &AggregateArgs) -> Result<()> {
    // Validate period selector
    args.period
        .parse::<Period>()
        .with_context(|| format!("Invalid --period value '{}'", args.period))?;

    // Validate input path
    if let Some(input) = &args.input {
        if input.as_os_str().is_empty() {
            anyhow::bail!("Input path cannot be empty");
        }
    }

    // Validate date window
    if args.since.is_some() && args.last_year {
        anyhow::bail!("--since and --last-year cannot be used together");
    }

    if let Some(since) = &args.since {
        parse_timestamp(&serde_json::Value::String(since.clone()))
            .with_context(|| format!("Invalid --since value '{}'", since))?;
    }

    // Validate summary rows
    if args.summary_rows == 0 {
        anyhow::bail!("summary rows must be greater than 0");
    }

    if args.summary_rows > MAX_SUMMARY_ROWS {
        anyhow::bail!("summary rows is too large (max {})", MAX_SUMMARY_ROWS);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_valid() {
        let args = AggregateArgs {
            input: Some(PathBuf::from("trades.json")),
            period: "weekly".to_string(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_unknown_period() {
        let args = AggregateArgs {
            period: "fortnightly".to_string(),
            ..Default::default()
        };

        let err = validate_args(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid configuration"));
    }

    #[test]
    fn test_validate_args_empty_input() {
        let args = AggregateArgs {
            input: Some(PathBuf::new()),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_conflicting_window() {
        let args = AggregateArgs {
            since: Some("2023-01-01".to_string()),
            last_year: true,
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_bad_since() {
        let args = AggregateArgs {
            since: Some("yesterday-ish".to_string()),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_summary_rows_zero() {
        let args = AggregateArgs {
            summary_rows: 0,
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_summary_rows_too_large() {
        let args = AggregateArgs {
            summary_rows: 2000,
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_window_last_year() {
        let now = Utc.with_ymd_and_hms(2024, 8, 17, 10, 0, 0).unwrap();
        let args = AggregateArgs {
            last_year: true,
            ..Default::default()
        };

        let cutoff = resolve_window_start(&args, now).unwrap();

        assert_eq!(cutoff, Some(Utc.with_ymd_and_hms(2023, 8, 17, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_window_last_year_leap_day() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap();
        let args = AggregateArgs {
            last_year: true,
            ..Default::default()
        };

        let cutoff = resolve_window_start(&args, now).unwrap();

        assert_eq!(cutoff, Some(Utc.with_ymd_and_hms(2023, 2, 28, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_window_since() {
        let args = AggregateArgs {
            since: Some("2023-06-01".to_string()),
            ..Default::default()
        };

        let cutoff = resolve_window_start(&args, Utc::now()).unwrap();

        assert_eq!(cutoff, Some(Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_window_none() {
        let args = AggregateArgs::default();
        assert_eq!(resolve_window_start(&args, Utc::now()).unwrap(), None);
    }
}
