//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Name of the root node in the hierarchical projection
pub const HIERARCHY_ROOT_NAME: &str = "Trades";

/// Default number of buckets listed in the text summary
pub const DEFAULT_SUMMARY_ROWS: usize = 20;
pub const MAX_SUMMARY_ROWS: usize = 1000;

// Integer timestamps above this are taken as epoch milliseconds, below as seconds.
// 1e11 seconds is roughly the year 5138, 1e11 milliseconds is early 1973.
pub const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

// Field names for record parsing (different feeds use different names)
pub const RECORD_ARRAY_FIELD_NAMES: &[&str] = &["trades", "records", "data", "result", "items"];
pub const TIMESTAMP_FIELD_NAMES: &[&str] = &[
    "timestamp",
    "ts",
    "time",
    "date",
    "tradeTime",
    "trade_time",
];
pub const SIZE_FIELD_NAMES: &[&str] = &[
    "tradeSize",
    "trade_size",
    "size",
    "quantity",
    "qty",
    "volume",
];
pub const PRICE_FIELD_NAMES: &[&str] = &["price", "tradePrice", "trade_price", "px"];
