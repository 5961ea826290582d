//! Listing-page extraction
//!
//! This module parses a listing page into:
//! - The pagination bound (highest purely-numeric page marker), discovered
//!   once per run from page 1
//! - The article entries on the page, as [`RawItem`] values
//!
//! Entries missing a title or link are skipped with a warning; they never
//! fail the page. An empty extraction result is the driver's signal that
//! pagination has run past the real end of the listing.

use crate::config::SelectorConfig;
use crate::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Leading bracketed classification tags on titles, e.g. "[SALAH] ..." or
/// "[HOAX][FITNAH] ..."
static LEADING_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\[[^\]]*\]\s*)+").unwrap());

/// Default stored when a listing entry carries no published-time marker
pub const DEFAULT_TIME_MARKER: &str = "N/A";

/// One article entry extracted from a listing page
///
/// All fields are always present; `time_marker` falls back to
/// [`DEFAULT_TIME_MARKER`] rather than being absent.
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    pub title: String,
    pub link: String,
    pub time_marker: String,
}

/// The source's selectors, compiled once per run
pub struct SelectorSet {
    entry: Selector,
    title: Selector,
    link: Selector,
    time: Selector,
    pagination: Selector,
    content: Selector,
    // Fallback for pagination discovery on sites without marker classes
    anchor: Selector,
}

impl SelectorSet {
    /// Compiles the configured selector strings
    ///
    /// Config validation has already compiled these once, so a failure here
    /// means the config bypassed validation (e.g. was built in code).
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            entry: compile_one(&config.entry)?,
            title: compile_one(&config.title)?,
            link: compile_one(&config.link)?,
            time: compile_one(&config.time)?,
            pagination: compile_one(&config.pagination)?,
            content: compile_one(&config.content)?,
            anchor: compile_one("a")?,
        })
    }

    pub(crate) fn content(&self) -> &Selector {
        &self.content
    }
}

fn compile_one(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(selector.to_string(), e.to_string()))
}

/// Discovers the highest listing page number advertised by a page
///
/// Scans the pagination markers and keeps the texts that are purely
/// numeric; the result is the maximum. When the configured marker selector
/// yields nothing numeric, every anchor on the page is scanned the same
/// way. Defaults to 1 when no numeric marker exists at all: a site showing
/// a single page, or markup that differs from the selector, both mean
/// "walk one page", not an error.
///
/// Runs once per harvest, against page 1, before the main loop.
pub fn discover_last_page(html: &str, selectors: &SelectorSet) -> u32 {
    let document = Html::parse_document(html);

    let last = max_numeric_text(document.select(&selectors.pagination))
        .or_else(|| max_numeric_text(document.select(&selectors.anchor)))
        .unwrap_or(1);

    debug!(last_page = last, "Discovered pagination bound");
    last
}

fn max_numeric_text<'a>(elements: impl Iterator<Item = ElementRef<'a>>) -> Option<u32> {
    elements
        .filter_map(|element| element_text(element).parse::<u32>().ok())
        .filter(|&n| n >= 1)
        .max()
}

/// Extracts the article entries from a listing page
///
/// For each entry matched by the entry selector:
/// - title: required; leading bracketed tags are stripped and whitespace
///   trimmed
/// - link: required; taken from the entry's first matching anchor and
///   resolved against `base_url` so relative hrefs survive
/// - time marker: optional, defaulting to [`DEFAULT_TIME_MARKER`]
///
/// Entries missing title or link are logged and skipped.
pub fn extract_listing(html: &str, base_url: &Url, selectors: &SelectorSet) -> Vec<RawItem> {
    let document = Html::parse_document(html);
    let mut items = Vec::new();

    for (index, entry) in document.select(&selectors.entry).enumerate() {
        let title = entry
            .select(&selectors.title)
            .next()
            .map(|el| clean_title(&element_text(el)))
            .filter(|t| !t.is_empty());
        let Some(title) = title else {
            warn!(index, "Listing entry has no usable title, skipping");
            continue;
        };

        let href = entry
            .select(&selectors.link)
            .next()
            .and_then(|el| el.value().attr("href"));
        let Some(href) = href else {
            warn!(index, %title, "Listing entry has no link, skipping");
            continue;
        };
        let link = match base_url.join(href.trim()) {
            Ok(resolved) => resolved.to_string(),
            Err(e) => {
                warn!(index, %title, href, error = %e, "Listing entry link is malformed, skipping");
                continue;
            }
        };

        let time_marker = entry
            .select(&selectors.time)
            .next()
            .map(|el| element_text(el))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TIME_MARKER.to_string());

        items.push(RawItem {
            title,
            link,
            time_marker,
        });
    }

    debug!(count = items.len(), "Extracted listing entries");
    items
}

/// Strips leading bracketed tags from a raw title and trims whitespace
pub fn clean_title(raw: &str) -> String {
    LEADING_TAGS.replace(raw.trim(), "").trim().to_string()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
