//! Bar-chart view: parallel label and volume arrays.

use crate::aggregator::ReducedBucket;
use serde::{Deserialize, Serialize};

/// Volume per bucket, `labels[i]` pairs with `values[i]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesProjection {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl SeriesProjection {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate (label, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Build the series from buckets already in display order
pub(crate) fn build_series<'a>(
    buckets: impl IntoIterator<Item = &'a ReducedBucket>,
) -> SeriesProjection {
    let (labels, values) = buckets
        .into_iter()
        .map(|b| (b.key.label.clone(), b.total_volume))
        .unzip();

    SeriesProjection { labels, values }
}
