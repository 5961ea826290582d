//! Output module for exporting and summarizing the article store
//!
//! This module handles:
//! - CSV export of all stored articles
//! - Store statistics for the CLI stats mode

mod csv;
pub mod stats;

pub use csv::{export_csv, format_csv};
pub use stats::{load_statistics, print_statistics, StoreStatistics};
