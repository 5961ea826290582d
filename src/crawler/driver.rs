//! Harvest driver - pagination walk and dedup ingest
//!
//! The driver owns everything a run needs: the configuration, the compiled
//! selectors, the HTTP client, and the article store. It discovers the
//! pagination bound from page 1, walks the listing pages strictly
//! sequentially, and ingests each article at most once.
//!
//! Failure isolation:
//! - A listing page that fails to fetch is recorded and skipped; the walk
//!   continues at the next page.
//! - A bad item never aborts its page; a storage error on one article is
//!   logged and the loop moves on.
//! - Only the mandatory page-1 discovery fetch is fatal.

use crate::config::Config;
use crate::crawler::article::resolve_body;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::listing::{discover_last_page, extract_listing, RawItem, SelectorSet};
use crate::storage::{ArticleRecord, ArticleStore};
use crate::KlipingError;
use chrono::Utc;
use reqwest::Client;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Outcome counters for one harvest run
///
/// Created empty at run start, mutated only by the driver, reported at run
/// end. Not persisted.
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Articles newly persisted this run
    pub inserted: u64,

    /// Articles skipped because their link was already stored
    pub duplicates: u64,

    /// Listing pages that failed to fetch and were skipped
    pub failed_pages: BTreeSet<u32>,
}

/// Page bounds for one run
///
/// The upper bound is discovered once from page 1 and held fixed; a site
/// that shrinks mid-run is caught by the empty-listing check instead of
/// re-discovery.
#[derive(Debug, Clone, Copy)]
struct PaginationState {
    start_page: u32,
    last_page: u32,
}

/// Drives a harvest run against a single configured source
pub struct Harvester<S: ArticleStore> {
    config: Config,
    selectors: SelectorSet,
    client: Client,
    store: S,
}

impl<S: ArticleStore> Harvester<S> {
    /// Creates a harvester from a validated configuration and an open store
    pub fn new(config: Config, store: S) -> Result<Self, KlipingError> {
        let selectors = SelectorSet::compile(&config.selectors)?;
        let client = build_http_client(&config.http)?;

        Ok(Self {
            config,
            selectors,
            client,
            store,
        })
    }

    /// Runs the harvest: discovery, page walk, ingest, summary
    pub async fn run(&mut self) -> Result<CrawlReport, KlipingError> {
        let label = self.config.source.label;
        let item_delay = Duration::from_millis(self.config.politeness.item_delay_ms);
        let page_delay = Duration::from_millis(self.config.politeness.page_delay_ms);

        // Mandatory discovery fetch; failing here aborts the run
        let first_url = self.config.source.page_url(1);
        info!(source = %self.config.source.name, url = %first_url, "Fetching page 1 to discover pagination");
        let first_html = fetch_page(&self.client, &first_url).await?;

        let discovered = discover_last_page(&first_html, &self.selectors);
        let last_page = match self.config.source.max_page {
            Some(cap) => discovered.min(cap),
            None => discovered,
        };
        let pagination = PaginationState {
            start_page: self.config.source.start_page.max(1),
            last_page,
        };
        info!(
            discovered,
            start_page = pagination.start_page,
            last_page = pagination.last_page,
            "Pagination bounds fixed for this run"
        );
        if pagination.start_page > pagination.last_page {
            warn!(
                start_page = pagination.start_page,
                last_page = pagination.last_page,
                "Start page is beyond the last page, nothing to harvest"
            );
        }

        let mut report = CrawlReport::default();
        // Reused so page 1 is not fetched twice when the walk starts there
        let mut first_html = Some(first_html);

        for page in pagination.start_page..=pagination.last_page {
            let page_url = self.config.source.page_url(page);

            let html = match first_html.take().filter(|_| page == 1) {
                Some(html) => html,
                None => match fetch_page(&self.client, &page_url).await {
                    Ok(html) => html,
                    Err(e) => {
                        warn!(page, error = %e, "Listing page fetch failed, skipping");
                        report.failed_pages.insert(page);
                        tokio::time::sleep(page_delay).await;
                        continue;
                    }
                },
            };

            let base_url = Url::parse(&page_url)?;
            let items = extract_listing(&html, &base_url, &self.selectors);
            if items.is_empty() {
                // The advertised page count can overshoot the real listing;
                // an empty page is the authoritative end
                info!(page, "Listing page yielded no entries, stopping pagination");
                break;
            }
            info!(page, count = items.len(), "Processing listing entries");

            for item in items {
                self.ingest_item(&mut report, item, label).await;
                tokio::time::sleep(item_delay).await;
            }

            tokio::time::sleep(page_delay).await;
        }

        info!(
            inserted = report.inserted,
            duplicates = report.duplicates,
            failed_pages = ?report.failed_pages,
            "Harvest run complete"
        );
        Ok(report)
    }

    /// Ingests one listing entry: resolve body, dedup check, insert
    ///
    /// Never returns an error; every failure here is item-local.
    async fn ingest_item(&mut self, report: &mut CrawlReport, item: RawItem, label: i64) {
        let body = resolve_body(&self.client, &item.link, &self.selectors).await;

        let known = match self.store.exists(&item.link) {
            Ok(known) => known,
            Err(e) => {
                warn!(link = %item.link, error = %e, "Duplicate check failed, skipping item");
                return;
            }
        };
        if known {
            info!(link = %item.link, "Article already stored, skipping");
            report.duplicates += 1;
            return;
        }

        let record = ArticleRecord {
            title: item.title,
            link: item.link,
            time_marker: item.time_marker,
            body,
            label,
            fetched_at: Utc::now().to_rfc3339(),
        };

        match self.store.insert_if_absent(&record) {
            Ok(true) => {
                info!(title = %record.title, "Stored article");
                report.inserted += 1;
            }
            Ok(false) => {
                // Same link listed twice on one page lands here
                info!(link = %record.link, "Article already stored, skipping");
                report.duplicates += 1;
            }
            Err(e) => {
                warn!(link = %record.link, error = %e, "Failed to store article");
            }
        }
    }
}
