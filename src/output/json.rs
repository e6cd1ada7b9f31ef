//! JSON report and projection writers.
//!
//! Writes Report structs, or a single projection for a standalone chart
//! renderer, to JSON files with proper formatting.

use crate::parser::schema::Report;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_json(report, output_path.as_ref())
}

/// Write one projection (series or hierarchy) to a JSON file
///
/// **Public** - each chart renderer gets only the shape it consumes
pub fn write_projection<T: Serialize>(
    projection: &T,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_json(projection, output_path.as_ref())
}

/// Serialize any value as pretty JSON
///
/// **Private** - shared by the public writers
fn write_json<T: Serialize + ?Sized>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    info!("Writing JSON to: {}", output_path.display());

    // Validate path
    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    // I/O failures surfacing through serde_json are still write failures
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| {
        if e.is_io() {
            OutputError::WriteFailed(e.into())
        } else {
            OutputError::SerializationFailed(e)
        }
    })?;

    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "JSON written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(ext) = path.extension() {
        if ext != "json" {
            debug!("Output does not have .json extension: {}", path.display());
        }
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a report from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<Report, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let report: Report = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, period {}, {} buckets",
        report.version,
        report.period,
        report.series.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{Period, VolumeDistribution};
    use crate::projection::{HierarchyNode, HierarchyProjection, SeriesProjection};
    use tempfile::NamedTempFile;

    fn create_test_report() -> Report {
        Report {
            version: "1.0.0".to_string(),
            period: Period::Monthly,
            generated_at: "2024-01-01T00:00:00Z".to_string(),
            total_records: 3,
            skipped_records: 1,
            invalid_timestamps: 1,
            summary: VolumeDistribution::default(),
            series: SeriesProjection {
                labels: vec!["2023-1".to_string()],
                values: vec![30.0],
            },
            hierarchy: HierarchyProjection {
                name: "Trades".to_string(),
                children: vec![HierarchyNode {
                    name: "2023-1".to_string(),
                    value: 120.0,
                    color: "#4e79a7".to_string(),
                }],
            },
        }
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.period, report.period);
        assert_eq!(loaded.series, report.series);
        assert_eq!(loaded.hierarchy, report.hierarchy);
    }

    #[test]
    fn test_write_projection_standalone() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();

        write_projection(&report.series, temp_file.path()).unwrap();

        let raw = std::fs::read_to_string(temp_file.path()).unwrap();
        let loaded: SeriesProjection = serde_json::from_str(&raw).unwrap();
        assert_eq!(loaded, report.series);
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&create_test_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_report_surfaces_flush_failure() {
        let result = write_report(&create_test_report(), "/dev/full");
        assert!(matches!(result, Err(OutputError::WriteFailed(_))));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_projection_surfaces_flush_failure() {
        let report = create_test_report();
        let result = write_projection(&report.hierarchy, "/dev/full");
        assert!(matches!(result, Err(OutputError::WriteFailed(_))));
    }

    #[test]
    fn test_read_report_invalid_json() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "{\"version\": 1}").unwrap();

        let result = read_report(temp_file.path());
        assert!(matches!(result, Err(OutputError::SerializationFailed(_))));
    }
}
