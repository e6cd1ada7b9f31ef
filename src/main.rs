//! Trade Bucket Studio CLI
//!
//! Buckets trade records by calendar period and writes chart-ready
//! volume series and notional treemap data.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trade_bucket_studio::commands::{
    display_schema, display_version, execute_aggregate, validate_args, validate_report_file,
    AggregateArgs,
};
use trade_bucket_studio::utils::config::DEFAULT_SUMMARY_ROWS;

/// Trade Bucket Studio - calendar bucketing for trade records
#[derive(Parser, Debug)]
#[command(name = "trade-buckets")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Bucket trade records and write projections
    Aggregate {
        /// Trade records JSON file ("-" or omitted reads stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Period: daily, weekly, monthly or quarterly
        #[arg(short, long, default_value = "daily", env = "TRADE_BUCKETS_PERIOD")]
        period: String,

        /// Output path for the full JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Also write the series projection to this path
        #[arg(long)]
        series: Option<PathBuf>,

        /// Also write the hierarchy projection to this path
        #[arg(long)]
        tree: Option<PathBuf>,

        /// Keep only records at or after this date or timestamp
        #[arg(long)]
        since: Option<String>,

        /// Keep only records from the last twelve months
        #[arg(long)]
        last_year: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Number of periods shown in the summary
        #[arg(long, default_value_t = DEFAULT_SUMMARY_ROWS)]
        top: usize,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Aggregate {
            input,
            period,
            output,
            series,
            tree,
            since,
            last_year,
            summary,
            top,
        } => {
            let args = AggregateArgs {
                input,
                period,
                output_json: Some(output),
                output_series: series,
                output_tree: tree,
                since,
                last_year,
                print_summary: summary,
                summary_rows: top,
            };

            // Validate args first
            validate_args(&args)?;

            execute_aggregate(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
