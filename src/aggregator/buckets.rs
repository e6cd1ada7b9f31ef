//! Group trade records into calendar buckets.
//!
//! Each record lands in exactly one bucket, chosen by `derive_key`.
//! Buckets come back in a `BTreeMap`, so iteration is chronological no
//! matter what order the records arrived in. Inside a bucket, records keep
//! their input order.

use super::period::{derive_key, BucketKey, Period};
use crate::parser::TradeRecord;
use log::debug;
use std::collections::BTreeMap;

/// All records that fall in one period instance
///
/// **Public** - produced by `aggregate`, consumed by the metric reducer
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub key: BucketKey,
    pub records: Vec<TradeRecord>,
}

impl Bucket {
    fn new(key: BucketKey) -> Self {
        Self {
            key,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Group records by period
///
/// **Public** - main entry point for bucketing
///
/// # Arguments
/// * `records` - Valid trade records, in any order
/// * `period` - Calendar period to group by
///
/// # Returns
/// Buckets keyed and ordered by period start. Empty input gives an empty map.
pub fn aggregate(records: &[TradeRecord], period: Period) -> BTreeMap<BucketKey, Bucket> {
    debug!("Aggregating {} records by {} period", records.len(), period);

    let mut buckets: BTreeMap<BucketKey, Bucket> = BTreeMap::new();

    for record in records {
        let key = derive_key(&record.timestamp, period);
        buckets
            .entry(key)
            .or_insert_with_key(|key| Bucket::new(key.clone()))
            .records
            .push(*record);
    }

    debug!("Built {} {} buckets", buckets.len(), period);
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(y: i32, m: u32, d: u32, size: f64, price: f64) -> TradeRecord {
        TradeRecord::new(Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap(), size, price)
    }

    #[test]
    fn test_aggregate_empty() {
        let buckets = aggregate(&[], Period::Daily);
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_aggregate_groups_same_day() {
        let records = vec![
            record(2023, 1, 1, 10.0, 5.0),
            record(2023, 1, 2, 20.0, 3.0),
            record(2023, 1, 1, 1.0, 7.0),
        ];

        let buckets = aggregate(&records, Period::Daily);

        assert_eq!(buckets.len(), 2);
        let first = buckets.values().next().unwrap();
        assert_eq!(first.key.label, "2023-01-01");
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_aggregate_keeps_input_order_within_bucket() {
        let records = vec![
            record(2023, 1, 3, 3.0, 1.0),
            record(2023, 1, 1, 1.0, 1.0),
            record(2023, 1, 2, 2.0, 1.0),
        ];

        let buckets = aggregate(&records, Period::Weekly);

        assert_eq!(buckets.len(), 1);
        let sizes: Vec<f64> = buckets
            .values()
            .next()
            .unwrap()
            .records
            .iter()
            .map(|r| r.trade_size)
            .collect();
        assert_eq!(sizes, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_aggregate_iterates_chronologically() {
        let records = vec![
            record(2023, 11, 1, 1.0, 1.0),
            record(2023, 2, 1, 1.0, 1.0),
            record(2023, 10, 1, 1.0, 1.0),
        ];

        let labels: Vec<String> = aggregate(&records, Period::Monthly)
            .into_keys()
            .map(|k| k.label)
            .collect();

        assert_eq!(labels, vec!["2023-2", "2023-10", "2023-11"]);
    }
}
