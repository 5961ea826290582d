use crate::config::types::{
    Config, HttpConfig, OutputConfig, SelectorConfig, SourceConfig, PAGE_PLACEHOLDER,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source(&config.source)?;
    validate_http(&config.http)?;
    validate_selectors(&config.selectors)?;
    validate_output(&config.output)?;
    Ok(())
}

/// Validates the source section
fn validate_source(source: &SourceConfig) -> Result<(), ConfigError> {
    if source.name.is_empty() {
        return Err(ConfigError::Validation(
            "source name cannot be empty".to_string(),
        ));
    }

    if !source.listing_url_template.contains(PAGE_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "listing-url-template must contain the {} placeholder, got '{}'",
            PAGE_PLACEHOLDER, source.listing_url_template
        )));
    }

    // The substituted template must be a fetchable URL
    let sample = source.page_url(1);
    let url = Url::parse(&sample)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid listing URL '{}': {}", sample, e)))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "listing-url-template must use an http or https scheme, got '{}'",
            url.scheme()
        )));
    }

    if source.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start-page must be >= 1, got {}",
            source.start_page
        )));
    }

    if let Some(max_page) = source.max_page {
        if max_page < source.start_page {
            return Err(ConfigError::Validation(format!(
                "max-page ({}) must be >= start-page ({})",
                max_page, source.start_page
            )));
        }
    }

    Ok(())
}

/// Validates the http section
fn validate_http(http: &HttpConfig) -> Result<(), ConfigError> {
    if http.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if http.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            http.timeout_secs
        )));
    }

    if http.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            http.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates that every configured selector compiles
fn validate_selectors(selectors: &SelectorConfig) -> Result<(), ConfigError> {
    for (name, selector) in [
        ("entry", &selectors.entry),
        ("title", &selectors.title),
        ("link", &selectors.link),
        ("time", &selectors.time),
        ("pagination", &selectors.pagination),
        ("content", &selectors.content),
    ] {
        if selector.is_empty() {
            return Err(ConfigError::Validation(format!(
                "selector '{}' cannot be empty",
                name
            )));
        }
        Selector::parse(selector).map_err(|e| {
            ConfigError::InvalidSelector(selector.to_string(), e.to_string())
        })?;
    }

    Ok(())
}

/// Validates the output section
fn validate_output(output: &OutputConfig) -> Result<(), ConfigError> {
    if output.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    if output.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
