//! Detail-page body resolution
//!
//! Article bodies live on a second document, the detail page. Resolution is
//! best-effort: a fetch failure or missing content container yields an empty
//! body and never blocks ingestion of the article's metadata.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::listing::SelectorSet;
use reqwest::Client;
use scraper::Html;
use tracing::warn;

/// Fetches an article's detail page and extracts its body text
///
/// Returns the concatenated text of the configured paragraph-level content
/// elements, each trimmed, joined with single spaces. Returns an empty
/// string when the fetch fails or the container is absent.
pub async fn resolve_body(client: &Client, link: &str, selectors: &SelectorSet) -> String {
    let html = match fetch_page(client, link).await {
        Ok(body) => body,
        Err(e) => {
            warn!(%link, error = %e, "Failed to fetch article body");
            return String::new();
        }
    };

    extract_body(&html, selectors)
}

/// Extracts body text from an already-fetched detail page
pub fn extract_body(html: &str, selectors: &SelectorSet) -> String {
    let document = Html::parse_document(html);

    let paragraphs: Vec<String> = document
        .select(selectors.content())
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    paragraphs.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;

    fn selectors() -> SelectorSet {
        // Default content selector: div.detail-text p
        SelectorSet::compile(&SelectorConfig::default()).unwrap()
    }

    #[test]
    fn test_extract_joins_paragraphs_with_single_spaces() {
        let html = r#"<html><body><div class="detail-text">
            <p>  First paragraph. </p>
            <p>Second paragraph.</p>
            <p>Third.</p>
        </div></body></html>"#;
        assert_eq!(
            extract_body(html, &selectors()),
            "First paragraph. Second paragraph. Third."
        );
    }

    #[test]
    fn test_extract_skips_empty_paragraphs() {
        let html = r#"<html><body><div class="detail-text">
            <p>Kept.</p>
            <p>   </p>
            <p>Also kept.</p>
        </div></body></html>"#;
        assert_eq!(extract_body(html, &selectors()), "Kept. Also kept.");
    }

    #[test]
    fn test_extract_missing_container_yields_empty() {
        let html = r#"<html><body><div class="unrelated"><p>Not this.</p></div></body></html>"#;
        assert_eq!(extract_body(html, &selectors()), "");
    }

    #[test]
    fn test_extract_blockquote_content_selector() {
        let config = SelectorConfig {
            content: "blockquote p".to_string(),
            ..SelectorConfig::default()
        };
        let selectors = SelectorSet::compile(&config).unwrap();

        let html = r#"<html><body>
            <p>Lead-in commentary.</p>
            <blockquote><p>Quoted claim.</p><p>More of it.</p></blockquote>
        </body></html>"#;
        assert_eq!(extract_body(html, &selectors), "Quoted claim. More of it.");
    }
}
