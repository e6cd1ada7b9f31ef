//! Output writers for reports and projections.
//!
//! This module handles everything handed to the outside world:
//! - JSON reports and standalone projections for chart renderers
//! - Text summaries for the terminal

pub mod json;
pub mod summary;

// Re-export main functions
pub use json::{read_report, write_projection, write_report};
pub use summary::generate_text_summary;
