//! Bucketing of trade records into calendar periods.
//!
//! This module transforms parsed trade records into:
//! - Period keys (daily, weekly, monthly, quarterly)
//! - Buckets holding every record of one period instance
//! - Per-bucket volume and notional totals

pub mod buckets;
pub mod metrics;
pub mod period;

// Re-export main types and functions
pub use buckets::{aggregate, Bucket};
pub use metrics::{calculate_volume_distribution, reduce, reduce_all, ReducedBucket, VolumeDistribution};
pub use period::{derive_key, BucketKey, Period};
