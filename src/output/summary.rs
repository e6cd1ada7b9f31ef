//! Terminal summary of reduced buckets.

use crate::aggregator::ReducedBucket;
use crate::projection::ansi_color_for_key;

const RESET: &str = "\x1b[0m";
const BAR_WIDTH: usize = 40;

/// Create a text table of buckets plus a volume bar sketch
///
/// Rows follow the order of `reduced`, which callers keep chronological.
pub fn generate_text_summary(reduced: &[ReducedBucket], max_lines: usize) -> String {
    let mut lines = Vec::new();

    lines.push("  📊 VOLUME BY PERIOD".to_string());
    lines.push("  ┏━━━━━━━━━━━━┳━━━━━━━━┳━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━┓".to_string());
    lines.push(format!(
        "  ┃ {:<10} ┃ {:^6} ┃ {:^14} ┃ {:^16} ┃ {:^10} ┃",
        "Period", "TRADES", "VOLUME", "NOTIONAL", "AVG PX"
    ));
    lines.push("  ┣━━━━━━━━━━━━╋━━━━━━━━╋━━━━━━━━━━━━━━━━╋━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━━━┫".to_string());

    for bucket in reduced.iter().take(max_lines) {
        let color = ansi_color_for_key(bucket.key.as_str());
        lines.push(format!(
            "  ┃ {}{:<10}{} ┃ {:>6} ┃ {:>14.2} ┃ {:>16.2} ┃ {:>10.4} ┃",
            color,
            bucket.key.as_str(),
            RESET,
            bucket.trade_count,
            bucket.total_volume,
            bucket.total_notional,
            bucket.average_price()
        ));
    }

    lines.push("  ┗━━━━━━━━━━━━┻━━━━━━━━┻━━━━━━━━━━━━━━━━┻━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━━━┛".to_string());

    let peak = reduced
        .iter()
        .map(|b| b.total_volume)
        .fold(0.0_f64, f64::max);

    if peak > 0.0 {
        lines.push(String::new());
        lines.push("  VOLUME".to_string());

        for bucket in reduced.iter().take(max_lines) {
            let share = bucket.total_volume / peak;
            let bar = "█".repeat((share * BAR_WIDTH as f64).round() as usize);
            let color = ansi_color_for_key(bucket.key.as_str());

            lines.push(format!(
                "  {:<10} {}{:<width$}{} {:>6.1}%",
                bucket.key.as_str(),
                color,
                bar,
                RESET,
                share * 100.0,
                width = BAR_WIDTH
            ));
        }
    }

    if reduced.len() > max_lines {
        lines.push(String::new());
        lines.push(format!("   (Showing first {} of {} periods)", max_lines, reduced.len()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{aggregate, reduce_all, Period};
    use crate::parser::TradeRecord;
    use chrono::{TimeZone, Utc};

    fn reduced() -> Vec<ReducedBucket> {
        let records: Vec<TradeRecord> = (1..=5)
            .map(|d| {
                TradeRecord::new(
                    Utc.with_ymd_and_hms(2023, 1, d, 0, 0, 0).unwrap(),
                    d as f64 * 10.0,
                    2.0,
                )
            })
            .collect();
        reduce_all(&aggregate(&records, Period::Daily))
    }

    #[test]
    fn test_summary_lists_buckets() {
        let text = generate_text_summary(&reduced(), 10);
        assert!(text.contains("2023-01-01"));
        assert!(text.contains("2023-01-05"));
        assert!(text.contains("100.0%"));
        assert!(!text.contains("Showing first"));
    }

    #[test]
    fn test_summary_truncates() {
        let text = generate_text_summary(&reduced(), 2);
        assert!(text.contains("2023-01-02"));
        assert!(!text.contains("2023-01-03"));
        assert!(text.contains("Showing first 2 of 5 periods"));
    }

    #[test]
    fn test_summary_empty() {
        let text = generate_text_summary(&[], 10);
        assert!(text.contains("VOLUME BY PERIOD"));
        assert!(!text.contains("█"));
    }
}
