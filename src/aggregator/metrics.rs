//! Reduce buckets into per-period metrics.
//!
//! Volume is the sum of trade sizes. Notional is the sum of size × price,
//! a proxy for traded value. No rounding happens here; formatting belongs
//! to whoever displays the numbers.

use super::buckets::Bucket;
use super::period::BucketKey;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate metrics for one bucket
///
/// **Public** - input to the projection builder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReducedBucket {
    pub key: BucketKey,

    /// Σ trade size
    pub total_volume: f64,

    /// Σ trade size × price
    pub total_notional: f64,

    /// Number of trades in the bucket
    pub trade_count: usize,
}

impl ReducedBucket {
    /// Volume-weighted average price, 0 when the bucket has no volume
    pub fn average_price(&self) -> f64 {
        if self.total_volume > 0.0 {
            self.total_notional / self.total_volume
        } else {
            0.0
        }
    }
}

/// Reduce a single bucket
///
/// **Public** - buckets from `aggregate` always hold at least one record
pub fn reduce(bucket: &Bucket) -> ReducedBucket {
    debug_assert!(!bucket.is_empty(), "bucket {} has no records", bucket.key);

    let (total_volume, total_notional) = bucket
        .records
        .iter()
        .fold((0.0, 0.0), |(volume, notional), record| {
            (volume + record.trade_size, notional + record.notional())
        });

    ReducedBucket {
        key: bucket.key.clone(),
        total_volume,
        total_notional,
        trade_count: bucket.records.len(),
    }
}

/// Reduce every bucket, keeping the map's chronological order
///
/// **Public** - main entry point for metrics calculation
pub fn reduce_all(buckets: &BTreeMap<BucketKey, Bucket>) -> Vec<ReducedBucket> {
    debug!("Reducing {} buckets", buckets.len());
    buckets.values().map(reduce).collect()
}

/// Calculate volume distribution statistics
///
/// **Public** - provides summary statistics
pub fn calculate_volume_distribution(reduced: &[ReducedBucket]) -> VolumeDistribution {
    if reduced.is_empty() {
        return VolumeDistribution::default();
    }

    let total_volume: f64 = reduced.iter().map(|b| b.total_volume).sum();
    let total_notional: f64 = reduced.iter().map(|b| b.total_notional).sum();
    let trade_count: usize = reduced.iter().map(|b| b.trade_count).sum();

    // First bucket wins ties, so the result does not depend on sort stability
    let peak = reduced.iter().fold(None::<&ReducedBucket>, |best, b| match best {
        Some(current) if current.total_volume >= b.total_volume => Some(current),
        _ => Some(b),
    });

    VolumeDistribution {
        bucket_count: reduced.len(),
        trade_count,
        total_volume,
        total_notional,
        mean_volume_per_bucket: total_volume / reduced.len() as f64,
        peak_bucket: peak.map(|b| b.key.label.clone()),
        peak_volume: peak.map(|b| b.total_volume).unwrap_or(0.0),
    }
}

/// Volume distribution statistics
///
/// **Public** - returned from calculate_volume_distribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeDistribution {
    /// Number of non-empty buckets
    pub bucket_count: usize,

    /// Number of trades across all buckets
    pub trade_count: usize,

    /// Σ volume across all buckets
    pub total_volume: f64,

    /// Σ notional across all buckets
    pub total_notional: f64,

    /// Mean volume per bucket
    pub mean_volume_per_bucket: f64,

    /// Bucket with the highest volume
    pub peak_bucket: Option<String>,

    /// Volume of the peak bucket
    pub peak_volume: f64,
}

impl VolumeDistribution {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Buckets: {} | Trades: {} | Volume: {:.2} | Notional: {:.2} | Mean/bucket: {:.2} | Peak: {} ({:.2})",
            self.bucket_count,
            self.trade_count,
            self.total_volume,
            self.total_notional,
            self.mean_volume_per_bucket,
            self.peak_bucket.as_deref().unwrap_or("-"),
            self.peak_volume
        )
    }
}
