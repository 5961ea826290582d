//! Kliping main entry point
//!
//! This is the command-line interface for the Kliping article harvester.

use clap::Parser;
use kliping::config::load_config_with_hash;
use kliping::crawler::harvest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Kliping: an incremental news article harvester
///
/// Kliping walks a source's paginated article listings, extracts each
/// article's metadata and body text, and stores every article exactly once,
/// keyed by its link. Re-running against an unchanged source inserts
/// nothing new.
#[derive(Parser, Debug)]
#[command(name = "kliping")]
#[command(version = "1.0.0")]
#[command(about = "An incremental news article harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching
    #[arg(long, conflicts_with_all = ["stats", "export"])]
    dry_run: bool,

    /// Show statistics from the store and exit
    #[arg(long, conflicts_with_all = ["dry_run", "export"])]
    stats: bool,

    /// Export the store to CSV and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    export: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.export {
        handle_export(&config)?;
    } else {
        handle_harvest(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kliping=info,warn"),
            1 => EnvFilter::new("kliping=debug,info"),
            2 => EnvFilter::new("kliping=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the harvest plan
fn handle_dry_run(config: &kliping::config::Config) {
    println!("=== Kliping Dry Run ===\n");

    println!("Source:");
    println!("  Name: {}", config.source.name);
    println!("  Listing URL template: {}", config.source.listing_url_template);
    println!("  Label: {}", config.source.label);
    println!("  Start page: {}", config.source.start_page);
    match config.source.max_page {
        Some(max_page) => println!("  Max page: {}", max_page),
        None => println!("  Max page: discovered from page 1"),
    }

    println!("\nHTTP:");
    println!("  User-Agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nPoliteness:");
    println!("  Item delay: {}ms", config.politeness.item_delay_ms);
    println!("  Page delay: {}ms", config.politeness.page_delay_ms);

    println!("\nSelectors:");
    println!("  Entry: {}", config.selectors.entry);
    println!("  Title: {}", config.selectors.title);
    println!("  Link: {}", config.selectors.link);
    println!("  Time: {}", config.selectors.time);
    println!("  Pagination: {}", config.selectors.pagination);
    println!("  Content: {}", config.selectors.content);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start harvesting from {}",
        config.source.page_url(config.source.start_page)
    );
}

/// Handles the --stats mode: shows statistics from the store
fn handle_stats(config: &kliping::config::Config) -> Result<(), Box<dyn std::error::Error>> {
    use kliping::output::{load_statistics, print_statistics};
    use kliping::storage::SqliteStore;
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    let store = SqliteStore::new(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --export mode: writes the store to CSV
fn handle_export(config: &kliping::config::Config) -> Result<(), Box<dyn std::error::Error>> {
    use kliping::output::export_csv;
    use kliping::storage::SqliteStore;
    use std::path::Path;

    println!("=== Exporting Articles ===\n");
    println!("Database: {}", config.output.database_path);
    println!("Output: {}", config.output.csv_path);
    println!();

    let store = SqliteStore::new(Path::new(&config.output.database_path))?;
    let exported = export_csv(&store, Path::new(&config.output.csv_path))?;

    println!("✓ Exported {} articles to: {}", exported, config.output.csv_path);

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: kliping::config::Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting harvest of '{}' (label {})",
        config.source.name,
        config.source.label
    );

    match harvest(config).await {
        Ok(report) => {
            println!("Inserted: {}", report.inserted);
            println!("Duplicates skipped: {}", report.duplicates);
            if report.failed_pages.is_empty() {
                println!("Failed pages: none");
            } else {
                let pages: Vec<String> =
                    report.failed_pages.iter().map(|p| p.to_string()).collect();
                println!("Failed pages: {}", pages.join(", "));
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
