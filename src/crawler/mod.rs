//! Crawler module for listing-page harvesting
//!
//! This module contains the core harvest logic:
//! - HTTP fetching with a fixed identity and timeouts
//! - Pagination discovery and listing extraction
//! - Best-effort article body resolution
//! - The sequential harvest driver with per-page and per-item failure
//!   isolation

mod article;
mod driver;
mod fetcher;
mod listing;

pub use article::resolve_body;
pub use driver::{CrawlReport, Harvester};
pub use fetcher::{build_http_client, fetch_page, FetchError};
pub use listing::{
    clean_title, discover_last_page, extract_listing, RawItem, SelectorSet, DEFAULT_TIME_MARKER,
};

use crate::config::Config;
use crate::storage::SqliteStore;
use crate::KlipingError;
use std::path::Path;

/// Runs a complete harvest against the configured source
///
/// Opens the configured store, walks the listing pages, and returns the
/// run's report. The store connection lives exactly as long as the run.
pub async fn harvest(config: Config) -> Result<CrawlReport, KlipingError> {
    let store = SqliteStore::new(Path::new(&config.output.database_path))?;
    let mut harvester = Harvester::new(config, store)?;
    harvester.run().await
}
