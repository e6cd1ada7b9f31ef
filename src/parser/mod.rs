//! Trade record parsing and schema definitions.
//!
//! This module handles:
//! - Parsing raw JSON trade feeds
//! - Normalizing timestamps to UTC
//! - Skipping and reporting malformed records
//! - Defining output schema

pub mod schema;
pub mod trades;

// Re-export main types
pub use schema::{Report, TradeRecord};
pub use trades::{parse_record, parse_records, parse_timestamp, to_report, ParsedRecords, SkippedRecord};
