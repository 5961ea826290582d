use serde::Deserialize;

/// Placeholder substituted with the page number in the listing URL template
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Main configuration structure for Kliping
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub http: HttpConfig,
    pub politeness: PolitenessConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// The listing source to harvest
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Short name of the source, used in logs
    pub name: String,

    /// Listing page URL with a `{page}` placeholder,
    /// e.g. "https://example.com/news/page/{page}/"
    #[serde(rename = "listing-url-template")]
    pub listing_url_template: String,

    /// Integer label stored on every record from this source
    pub label: i64,

    /// First listing page to ingest (pagination is still discovered from page 1)
    #[serde(rename = "start-page", default = "default_start_page")]
    pub start_page: u32,

    /// Optional upper bound on the page walk, applied after discovery
    #[serde(rename = "max-page")]
    pub max_page: Option<u32>,
}

impl SourceConfig {
    /// Builds the listing URL for the given page number
    pub fn page_url(&self, page: u32) -> String {
        self.listing_url_template
            .replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}

fn default_start_page() -> u32 {
    1
}

/// Outbound HTTP configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Static User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Fixed politeness delays between outbound requests
#[derive(Debug, Clone, Deserialize)]
pub struct PolitenessConfig {
    /// Pause after each listing item (milliseconds)
    #[serde(rename = "item-delay-ms")]
    pub item_delay_ms: u64,

    /// Pause after each listing page (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,
}

/// CSS selectors describing the source's markup
///
/// The defaults fit common article listings; sources with different markup
/// override the relevant fields.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    /// One listing entry
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Title element inside an entry
    #[serde(default = "default_title")]
    pub title: String,

    /// Primary anchor inside an entry
    #[serde(default = "default_link")]
    pub link: String,

    /// Published-time element inside an entry
    #[serde(default = "default_time")]
    pub time: String,

    /// Pagination marker elements on a listing page
    #[serde(default = "default_pagination")]
    pub pagination: String,

    /// Paragraph-level content elements on an article detail page
    #[serde(default = "default_content")]
    pub content: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            title: default_title(),
            link: default_link(),
            time: default_time(),
            pagination: default_pagination(),
            content: default_content(),
        }
    }
}

fn default_entry() -> String {
    "article".to_string()
}

fn default_title() -> String {
    "h2, h3".to_string()
}

fn default_link() -> String {
    "a[href]".to_string()
}

fn default_time() -> String {
    "time, span.date".to_string()
}

fn default_pagination() -> String {
    "a.page-numbers".to_string()
}

fn default_content() -> String {
    "div.detail-text p".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path the CSV export is written to
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}
