//! HTTP fetch boundary
//!
//! This module handles all outbound HTTP for the harvester:
//! - Building the HTTP client with the configured identification header
//! - Fetching a single page body
//!
//! There is no retry logic here; retry policy belongs to the caller.

use crate::config::HttpConfig;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Errors from fetching a single page
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure or timeout
    #[error("request for {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: StatusCode },
}

/// Builds the HTTP client used for every request in a run
///
/// The client carries the configured static User-Agent and fixed timeouts.
/// No cookie store: no session state is carried between requests.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body
///
/// Fails on network errors, timeouts, and non-2xx responses. The caller
/// decides whether the failure is fatal (page-1 discovery) or recoverable
/// (a later listing page or an article body).
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Request {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|e| FetchError::Request {
        url: url.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> HttpConfig {
        HttpConfig {
            user_agent: "kliping-test/1.0".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 5,
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_status_error_names_url() {
        let error = FetchError::Status {
            url: "https://example.com/page/3/".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        let message = error.to_string();
        assert!(message.contains("https://example.com/page/3/"));
        assert!(message.contains("404"));
    }

    // Fetch behavior against live responses is covered by the wiremock
    // integration tests.
}
