//! Calendar period selection and bucket key derivation.
//!
//! Every timestamp maps to exactly one key per period mode. All calendar
//! arithmetic happens on the UTC date of the instant, so the same input
//! produces the same keys on every machine.
//!
//! Key formats:
//! - Daily:     `2023-01-05`
//! - Weekly:    `2023-01-01` (the Sunday that starts the week)
//! - Monthly:   `2023-1`
//! - Quarterly: `2023-Q1`

use crate::utils::error::AggregateError;
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Aggregation period selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::Quarterly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Period {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(Period::Daily),
            "weekly" | "week" | "w" => Ok(Period::Weekly),
            "monthly" | "month" | "m" => Ok(Period::Monthly),
            "quarterly" | "quarter" | "q" => Ok(Period::Quarterly),
            _ => Err(AggregateError::InvalidConfiguration(s.to_string())),
        }
    }
}

/// Identifies one period instance, e.g. `2023-Q1`
///
/// Ordering is by period start first, so a sorted collection of keys is
/// chronological. Comparing labels as strings would put `2023-10` before
/// `2023-2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    /// First calendar day of the period
    pub start: NaiveDate,

    /// Canonical key string
    pub label: String,
}

impl BucketKey {
    pub fn as_str(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl Serialize for BucketKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

/// Derive the bucket key for a timestamp under the given period
///
/// **Public** - the only place period boundaries are defined
///
/// Pure and total: works on a copy of the UTC calendar date and never
/// touches the caller's value.
pub fn derive_key(timestamp: &DateTime<Utc>, period: Period) -> BucketKey {
    let date = timestamp.date_naive();

    match period {
        Period::Daily => BucketKey {
            start: date,
            label: date.format("%Y-%m-%d").to_string(),
        },
        Period::Weekly => {
            let start = week_start(date);
            BucketKey {
                start,
                label: start.format("%Y-%m-%d").to_string(),
            }
        }
        Period::Monthly => BucketKey {
            start: date.with_day(1).unwrap_or(date),
            label: format!("{}-{}", date.year(), date.month()),
        },
        Period::Quarterly => {
            let quarter = date.month0() / 3 + 1;
            let start = date
                .with_day(1)
                .and_then(|d| d.with_month((quarter - 1) * 3 + 1))
                .unwrap_or(date);
            BucketKey {
                start,
                label: format!("{}-Q{}", date.year(), quarter),
            }
        }
    }
}

/// Sunday on or before `date`
///
/// **Private** - weekly helper
fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    // Only the first days of the calendar range can underflow
    date.checked_sub_days(Days::new(offset))
        .unwrap_or(NaiveDate::MIN)
}
