//! Projection of reduced buckets into chart-ready shapes.
//!
//! Two views come out of one chronologically sorted bucket list:
//! - Series (labels + volumes) for bar charts
//! - Hierarchy (root + notional leaves) for treemaps
//!
//! Both are built from the same ordering, so index `i` of the series and
//! child `i` of the hierarchy always describe the same bucket.

pub mod hierarchy;
pub mod palette;
pub mod series;

pub use hierarchy::{HierarchyNode, HierarchyProjection};
pub use palette::{ansi_color_for_key, color_for_key, PALETTE};
pub use series::SeriesProjection;

use crate::aggregator::{aggregate, reduce_all, Period, ReducedBucket};
use crate::parser::TradeRecord;
use log::debug;
use serde::{Deserialize, Serialize};

/// Both views of one aggregation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projections {
    pub series: SeriesProjection,
    pub hierarchy: HierarchyProjection,
}

/// Build both projections from reduced buckets
///
/// **Public** - main entry point for projection
///
/// Input order does not matter: buckets are sorted by period start here,
/// once, and both views read that single ordering.
pub fn build_projections(reduced: &[ReducedBucket]) -> Projections {
    let mut ordered: Vec<&ReducedBucket> = reduced.iter().collect();
    ordered.sort_by(|a, b| a.key.cmp(&b.key));

    debug!("Projecting {} buckets", ordered.len());

    Projections {
        series: series::build_series(ordered.iter().copied()),
        hierarchy: hierarchy::build_hierarchy(ordered.iter().copied()),
    }
}

/// Aggregate, reduce and project in one pass
///
/// **Public** - convenience for callers that only want chart data
pub fn summarize(records: &[TradeRecord], period: Period) -> Projections {
    let buckets = aggregate(records, period);
    build_projections(&reduce_all(&buckets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{derive_key, reduce_all};
    use crate::utils::config::HIERARCHY_ROOT_NAME;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn record(y: i32, m: u32, d: u32, size: f64, price: f64) -> TradeRecord {
        TradeRecord::new(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(), size, price)
    }

    #[test]
    fn test_daily_example() {
        let records = vec![record(2023, 1, 1, 10.0, 5.0), record(2023, 1, 2, 20.0, 3.0)];

        let projections = summarize(&records, Period::Daily);

        assert_eq!(projections.series.labels, vec!["2023-01-01", "2023-01-02"]);
        assert_eq!(projections.series.values, vec![10.0, 20.0]);
        assert_eq!(projections.hierarchy.name, HIERARCHY_ROOT_NAME);

        let children: Vec<(&str, f64)> = projections
            .hierarchy
            .children
            .iter()
            .map(|c| (c.name.as_str(), c.value))
            .collect();
        assert_eq!(children, vec![("2023-01-01", 50.0), ("2023-01-02", 60.0)]);
    }

    #[test]
    fn test_build_projections_sorts_input() {
        let records = vec![
            record(2023, 3, 1, 3.0, 1.0),
            record(2023, 1, 15, 1.0, 1.0),
            record(2023, 2, 10, 2.0, 1.0),
        ];
        let mut reduced = reduce_all(&aggregate(&records, Period::Monthly));
        reduced.reverse();

        let projections = build_projections(&reduced);

        assert_eq!(projections.series.labels, vec!["2023-1", "2023-2", "2023-3"]);
        assert_eq!(projections.series.values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_views_share_ordering() {
        let records = vec![
            record(2023, 12, 31, 1.0, 2.0),
            record(2024, 1, 1, 4.0, 2.0),
            record(2023, 6, 1, 2.0, 2.0),
        ];

        let projections = summarize(&records, Period::Quarterly);

        let names: Vec<&str> = projections
            .hierarchy
            .children
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        let labels: Vec<&str> = projections.series.labels.iter().map(String::as_str).collect();
        assert_eq!(names, labels);
        assert_eq!(labels, vec!["2023-Q2", "2023-Q4", "2024-Q1"]);
    }

    #[test]
    fn test_children_carry_palette_color() {
        let projections = summarize(&[record(2023, 1, 1, 1.0, 1.0)], Period::Daily);
        let key = derive_key(&Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(), Period::Daily);
        assert_eq!(projections.hierarchy.children[0].color, color_for_key(key.as_str()));
    }

    #[test]
    fn test_empty_input() {
        let projections = summarize(&[], Period::Weekly);
        assert!(projections.series.is_empty());
        assert!(projections.hierarchy.children.is_empty());
        assert_eq!(projections.hierarchy.name, HIERARCHY_ROOT_NAME);
    }
}
