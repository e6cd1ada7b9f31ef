//! Trade Bucket Studio
//!
//! Groups timestamped trade records into calendar periods (daily, weekly,
//! monthly, quarterly) and turns each period into chart-ready data: a
//! volume series for bar charts and a notional tree for treemaps.
//!
//! This crate provides the core implementation for the
//! `trade-buckets` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! trade-buckets aggregate --input trades.json --period monthly --summary
//! ```
//!
//! As a library:
//!
//! ```
//! use trade_bucket_studio::aggregator::Period;
//! use trade_bucket_studio::parser::parse_records;
//! use trade_bucket_studio::projection::summarize;
//!
//! let raw = serde_json::json!([
//!     {"timestamp": "2023-01-01T00:00:00Z", "size": 10, "price": 5},
//!     {"timestamp": "2023-01-02T00:00:00Z", "size": 20, "price": 3},
//! ]);
//! let parsed = parse_records(&raw).unwrap();
//! let charts = summarize(&parsed.records, Period::Daily);
//!
//! assert_eq!(charts.series.labels, vec!["2023-01-01", "2023-01-02"]);
//! assert_eq!(charts.hierarchy.children[1].value, 60.0);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod projection;
pub mod source;
pub mod utils;
