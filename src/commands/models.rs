use crate::utils::config::DEFAULT_SUMMARY_ROWS;
use std::path::PathBuf;

/// Arguments for the aggregate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AggregateArgs {
    /// Trade records JSON file (None = stdin)
    pub input: Option<PathBuf>,

    /// Raw period selector, parsed and validated by the command
    pub period: String,

    /// Output path for the full JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for the series projection alone (optional)
    pub output_series: Option<PathBuf>,

    /// Output path for the hierarchy projection alone (optional)
    pub output_tree: Option<PathBuf>,

    /// Keep only records at or after this timestamp
    pub since: Option<String>,

    /// Keep only records from the last twelve months
    pub last_year: bool,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Number of buckets shown in the text summary
    pub summary_rows: usize,
}

impl Default for AggregateArgs {
    fn default() -> Self {
        Self {
            input: None,
            period: "daily".to_string(),
            output_json: Some(PathBuf::from("report.json")),
            output_series: None,
            output_tree: None,
            since: None,
            last_year: false,
            print_summary: false,
            summary_rows: DEFAULT_SUMMARY_ROWS,
        }
    }
}
