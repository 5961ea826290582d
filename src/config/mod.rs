//! Configuration loading and validation
//!
//! The harvester is driven entirely by a TOML configuration file describing
//! the source (listing URL template, label, page range), its markup
//! selectors, outbound HTTP identity, politeness delays, and output paths.
//! Nothing is re-read mid-run.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    Config, HttpConfig, OutputConfig, PolitenessConfig, SelectorConfig, SourceConfig,
    PAGE_PLACEHOLDER,
};
pub use validation::validate;
