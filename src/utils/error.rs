//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while parsing the raw record document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid record document: {0}")]
    InvalidFormat(String),
}

/// Errors attached to a single trade record
///
/// These never abort a run. The offending record is left out of every
/// bucket and reported back to the caller as a `SkippedRecord`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Record is not a JSON object")]
    NotAnObject,

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid {field}: {value}")]
    InvalidQuantity { field: &'static str, value: String },
}

/// Errors raised by the aggregation engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    #[error("Invalid configuration: unrecognized period '{0}' (expected daily, weekly, monthly or quarterly)")]
    InvalidConfiguration(String),
}

/// Errors that can occur while reading raw input
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read input: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
