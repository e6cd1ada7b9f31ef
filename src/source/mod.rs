//! Raw record input.
//!
//! Fetching trades from an exchange is left to whatever produces the JSON;
//! this module only reads the document it left behind.

pub mod file;

pub use file::{load_raw_records, parse_reader, STDIN_MARKER};
