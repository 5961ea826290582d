use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, parses, and validates a configuration file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_and_validate(&content)
}

/// Loads a configuration and returns it together with its content hash
///
/// The hash is logged at startup so a run can be tied back to the exact
/// configuration that produced it. The file is read once; the hash covers
/// the same bytes that were parsed.
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_and_validate(&content)?;
    Ok((config, hash_content(&content)))
}

/// Computes the SHA-256 hash of a configuration file's content
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

fn parse_and_validate(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn hash_content(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const VALID_CONFIG: &str = r#"
[source]
name = "turnbackhoax"
listing-url-template = "https://turnbackhoax.example/page/{page}/"
label = 0
start-page = 1

[http]
user-agent = "Mozilla/5.0 (compatible; kliping/1.0)"
timeout-secs = 10

[politeness]
item-delay-ms = 1000
page-delay-ms = 2000

[selectors]
title = "h3.entry-title"
time = "span.mh-meta-date"
content = "blockquote p"

[output]
database-path = "./articles.db"
csv-path = "./articles.csv"
"#;

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.source.name, "turnbackhoax");
        assert_eq!(config.source.label, 0);
        assert_eq!(config.source.start_page, 1);
        assert_eq!(config.source.max_page, None);
        assert_eq!(config.politeness.item_delay_ms, 1000);
        assert_eq!(config.selectors.title, "h3.entry-title");
        // Unset selector fields fall back to defaults
        assert_eq!(config.selectors.entry, "article");
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result.unwrap_err(), ConfigError::Io(_)));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_missing_page_placeholder() {
        let content = VALID_CONFIG.replace("/page/{page}/", "/page/1/");
        let file = create_temp_config(&content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_hash_is_stable_for_same_content() {
        let file = create_temp_config(VALID_CONFIG);

        let first = compute_config_hash(file.path()).unwrap();
        let second = compute_config_hash(file.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 64); // hex-encoded SHA-256
    }

    #[test]
    fn test_hash_tracks_content_changes() {
        let original = create_temp_config(VALID_CONFIG);
        let edited = create_temp_config(&VALID_CONFIG.replace("label = 0", "label = 1"));

        assert_ne!(
            compute_config_hash(original.path()).unwrap(),
            compute_config_hash(edited.path()).unwrap()
        );
    }

    #[test]
    fn test_load_with_hash_matches_standalone_hash() {
        let file = create_temp_config(VALID_CONFIG);

        let (_, hash) = load_config_with_hash(file.path()).unwrap();
        assert_eq!(hash, compute_config_hash(file.path()).unwrap());
    }
}
