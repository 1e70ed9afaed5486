//! Merocrawl main entry point
//!
//! This is the command-line interface for the tutor directory harvester.

use clap::Parser;
use merocrawl::config::{load_config_with_hash, Config};
use merocrawl::crawler::crawl;
use merocrawl::output::{count_unique_emails, print_summary};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Merocrawl: a tutor directory harvester
///
/// Merocrawl pages through the tutor listings of every configured place and
/// grade category, scrapes each profile and writes the unique records to a
/// CSV file, checkpointing as it goes.
#[derive(Parser, Debug)]
#[command(name = "merocrawl")]
#[command(version)]
#[command(about = "A tutor directory harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write records to this CSV file instead of the configured one
    #[arg(short, long, value_name = "CSV")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "unique_emails")]
    dry_run: bool,

    /// Count distinct email addresses in an existing output file and exit
    #[arg(long, value_name = "CSV", conflicts_with = "dry_run")]
    unique_emails: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Some(path) = &cli.unique_emails {
        return handle_unique_emails(path);
    }

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("merocrawl=info,warn"),
            1 => EnvFilter::new("merocrawl=debug,info"),
            2 => EnvFilter::new("merocrawl=trace,debug"),
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

/// Handles the --dry-run mode: shows every target and its first listing URL
fn handle_dry_run(config: &Config) {
    println!("=== Merocrawl Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  User agent: {}", config.site.user_agent);

    println!("\nCrawler:");
    println!(
        "  Checkpoint every: {} records",
        config.crawler.checkpoint_interval
    );
    match config.crawler.request_timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: none"),
    }

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    let targets = config.targets();
    println!(
        "\nTargets ({} places x {} categories = {}):",
        config.places.len(),
        config.categories.len(),
        targets.len()
    );
    for target in &targets {
        println!("  - {}", target.page(1).url(&config.site.base_url));
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start {} crawl drivers", targets.len());
}

/// Handles the --unique-emails mode: reports on an existing output file
fn handle_unique_emails(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match count_unique_emails(path) {
        Ok(report) => {
            println!("Unique emails count: {}", report.unique_emails);
            tracing::info!("{} rows read from {}", report.rows, path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            Err(e.into())
        }
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Places: {}, Categories: {}, Output: {}",
        config.places.len(),
        config.categories.len(),
        config.output.csv_path
    );

    match crawl(config).await {
        Ok(summary) => {
            tracing::info!("Crawl completed");
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
