//! Input record and output report schema definitions.
//!
//! `TradeRecord` is what the engine works on once raw input is parsed.
//! `Report` is the JSON document we write to disk. Its schema is versioned
//! to allow future evolution.

use crate::aggregator::{Period, VolumeDistribution};
use crate::projection::{HierarchyProjection, SeriesProjection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single trade, normalized to UTC
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub timestamp: DateTime<Utc>,

    /// Traded quantity, never negative
    pub trade_size: f64,

    /// Price per unit, never negative
    pub price: f64,
}

impl TradeRecord {
    pub fn new(timestamp: DateTime<Utc>, trade_size: f64, price: f64) -> Self {
        Self {
            timestamp,
            trade_size,
            price,
        }
    }

    /// Size × price
    pub fn notional(&self) -> f64 {
        self.trade_size * self.price
    }
}

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Period the records were bucketed by
    pub period: Period,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Records that made it into a bucket
    pub total_records: usize,

    /// Records left out because they failed to parse
    pub skipped_records: usize,

    /// Subset of `skipped_records` whose timestamp could not be parsed
    #[serde(default)]
    pub invalid_timestamps: usize,

    /// Totals across all buckets
    pub summary: VolumeDistribution,

    /// Volume per bucket, for bar charts
    pub series: SeriesProjection,

    /// Notional per bucket, for treemaps
    pub hierarchy: HierarchyProjection,
}
