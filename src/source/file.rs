//! Read raw trade documents from a file or stdin.

use crate::utils::error::{ParseError, SourceError};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Marker meaning "read from stdin"
pub const STDIN_MARKER: &str = "-";

/// Load a raw JSON document
///
/// **Public** - main entry point for input
///
/// # Arguments
/// * `path` - JSON file to read; `None` or `-` reads stdin
///
/// # Errors
/// * `SourceError::ReadFailed` - File missing or unreadable
/// * `SourceError::Parse` - Content is not valid JSON
pub fn load_raw_records(path: Option<&Path>) -> Result<serde_json::Value, SourceError> {
    match path {
        Some(p) if p.as_os_str() != STDIN_MARKER => {
            info!("Reading records from: {}", p.display());
            let file = File::open(p)?;
            parse_reader(BufReader::new(file))
        }
        _ => {
            info!("Reading records from stdin");
            parse_reader(io::stdin().lock())
        }
    }
}

/// Parse a JSON document from any reader
///
/// **Public** - used by load_raw_records and tests
pub fn parse_reader(reader: impl Read) -> Result<serde_json::Value, SourceError> {
    let value: serde_json::Value = serde_json::from_reader(reader).map_err(ParseError::from)?;
    debug!(
        "Loaded JSON document ({})",
        match &value {
            serde_json::Value::Array(a) => format!("array of {}", a.len()),
            serde_json::Value::Object(o) => format!("object with {} fields", o.len()),
            _ => "scalar".to_string(),
        }
    );
    Ok(value)
}
