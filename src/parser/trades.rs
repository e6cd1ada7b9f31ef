//! Trade record parser.
//!
//! Turns a raw JSON document into `TradeRecord`s. Feeds disagree on field
//! names and on how timestamps are encoded, so lookups go through alias
//! tables and several timestamp encodings are accepted.
//!
//! A bad record never fails the whole document: it is skipped, logged and
//! returned in `ParsedRecords::skipped` so the caller can report it.

use super::schema::{Report, TradeRecord};
use crate::aggregator::{Period, VolumeDistribution};
use crate::projection::Projections;
use crate::utils::config::{
    EPOCH_MILLIS_THRESHOLD, PRICE_FIELD_NAMES, RECORD_ARRAY_FIELD_NAMES, SCHEMA_VERSION,
    SIZE_FIELD_NAMES, TIMESTAMP_FIELD_NAMES,
};
use crate::utils::error::{ParseError, RecordError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{debug, warn};
use serde_json::{Map, Value};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// A record that was left out, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Position in the input array
    pub index: usize,
    pub error: RecordError,
}

/// Result of parsing a record document
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    /// Valid records, in input order
    pub records: Vec<TradeRecord>,

    /// Records that failed to parse
    pub skipped: Vec<SkippedRecord>,
}

impl ParsedRecords {
    /// Number of records skipped for an unparseable timestamp
    pub fn invalid_timestamp_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s.error, RecordError::InvalidTimestamp(_)))
            .count()
    }
}

/// Parse a raw record document
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `raw` - Either a JSON array of records, or an object holding one
///   under a known field name (`trades`, `records`, `data`, ...)
///
/// # Returns
/// Parsed records plus the list of skipped ones
///
/// # Errors
/// * `ParseError::InvalidFormat` - No record array could be found
pub fn parse_records(raw: &Value) -> Result<ParsedRecords, ParseError> {
    let entries = extract_record_array(raw)?;
    debug!("Parsing {} raw records", entries.len());

    let mut parsed = ParsedRecords {
        records: Vec::with_capacity(entries.len()),
        skipped: Vec::new(),
    };

    for (index, entry) in entries.iter().enumerate() {
        match parse_record(entry) {
            Ok(record) => parsed.records.push(record),
            Err(error) => {
                warn!("Skipping record {}: {}", index, error);
                parsed.skipped.push(SkippedRecord { index, error });
            }
        }
    }

    if !parsed.skipped.is_empty() {
        warn!(
            "Skipped {} of {} records ({} with invalid timestamps)",
            parsed.skipped.len(),
            entries.len(),
            parsed.invalid_timestamp_count()
        );
    }

    Ok(parsed)
}

/// Find the array of records in the document
///
/// **Private** - internal helper for parse_records
fn extract_record_array(raw: &Value) -> Result<&[Value], ParseError> {
    match raw {
        Value::Array(entries) => Ok(entries.as_slice()),
        Value::Object(obj) => RECORD_ARRAY_FIELD_NAMES
            .iter()
            .find_map(|field| obj.get(*field).and_then(Value::as_array))
            .map(Vec::as_slice)
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Object has no record array (looked for: {})",
                    RECORD_ARRAY_FIELD_NAMES.join(", ")
                ))
            }),
        _ => Err(ParseError::InvalidFormat(
            "Records must be a JSON array or an object containing one".to_string(),
        )),
    }
}

/// Parse one record object
///
/// **Public** - also useful for validating a single record
pub fn parse_record(entry: &Value) -> Result<TradeRecord, RecordError> {
    let obj = entry.as_object().ok_or(RecordError::NotAnObject)?;

    let timestamp = find_field(obj, TIMESTAMP_FIELD_NAMES)
        .ok_or_else(|| RecordError::InvalidTimestamp("missing timestamp field".to_string()))
        .and_then(parse_timestamp)?;

    let trade_size = parse_quantity(obj, SIZE_FIELD_NAMES, "trade size")?;
    let price = parse_quantity(obj, PRICE_FIELD_NAMES, "price")?;

    Ok(TradeRecord::new(timestamp, trade_size, price))
}

/// Parse a timestamp into a UTC instant
///
/// **Public** - accepted encodings:
/// - RFC 3339 with offset (`2023-01-01T09:30:00+02:00`), converted to UTC
/// - Naive date-time (`2023-01-01T09:30:00`, `2023-01-01 09:30:00.250`), read as UTC
/// - Bare date (`2023-01-01` or `20230101`), UTC midnight
/// - Epoch seconds or milliseconds, as a number or numeric string
pub fn parse_timestamp(value: &Value) -> Result<DateTime<Utc>, RecordError> {
    let parsed = match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => match n.as_i64() {
            Some(epoch) => from_epoch(epoch),
            None => n.as_f64().and_then(from_epoch_f64),
        },
        _ => None,
    };

    parsed.ok_or_else(|| RecordError::InvalidTimestamp(value.to_string()))
}

/// **Private** - string branch of parse_timestamp
fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    // Eight digits is a compact date (20230115), never an epoch value
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(s, "%Y%m%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc());
    }

    if let Ok(epoch) = s.parse::<i64>() {
        return from_epoch(epoch);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Epoch seconds, or milliseconds once past the threshold
///
/// **Private** - internal utility
fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
    if value.unsigned_abs() >= EPOCH_MILLIS_THRESHOLD.unsigned_abs() {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

/// **Private** - fractional epoch values, kept to millisecond precision
fn from_epoch_f64(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }

    let millis = if value.abs() >= EPOCH_MILLIS_THRESHOLD as f64 {
        value.round()
    } else {
        (value * 1000.0).round()
    };

    if millis.abs() > i64::MAX as f64 {
        return None;
    }

    DateTime::from_timestamp_millis(millis as i64)
}

/// First present field out of a list of aliases
///
/// **Private** - internal utility
fn find_field<'a>(obj: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| obj.get(*name))
        .filter(|value| !value.is_null())
}

/// Parse a non-negative finite number from a number or numeric string
///
/// **Private** - internal utility
fn parse_quantity(
    obj: &Map<String, Value>,
    names: &[&str],
    field: &'static str,
) -> Result<f64, RecordError> {
    let value = find_field(obj, names).ok_or_else(|| RecordError::InvalidQuantity {
        field,
        value: "missing".to_string(),
    })?;

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(RecordError::InvalidQuantity {
            field,
            value: value.to_string(),
        }),
    }
}

/// Convert parsed records and projections to the output report
///
/// **Public** - used by commands to create final output
pub fn to_report(
    parsed: &ParsedRecords,
    period: Period,
    summary: VolumeDistribution,
    projections: Projections,
) -> Report {
    Report {
        version: SCHEMA_VERSION.to_string(),
        period,
        generated_at: Utc::now().to_rfc3339(),
        total_records: parsed.records.len(),
        skipped_records: parsed.skipped.len(),
        invalid_timestamps: parsed.invalid_timestamp_count(),
        summary,
        series: projections.series,
        hierarchy: projections.hierarchy,
    }
}
