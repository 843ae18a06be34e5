//! Catalog-Harvest main entry point
//!
//! This is the command-line interface for the vendor catalog harvester.

use anyhow::Context;
use catalog_harvest::config::{load_config_with_hash, Config};
use catalog_harvest::discover::discover_to_file;
use catalog_harvest::organize::organize;
use catalog_harvest::output::{
    print_batch_summary, print_discovery_summary, print_organize_summary, read_url_list,
};
use catalog_harvest::scrape::ProductScraper;
use catalog_harvest::session::{HttpPageSession, HttpSessionFactory, PageSession};
use catalog_harvest::{HarvestError, Vendor};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Catalog-Harvest: a product catalog harvester
///
/// Discovers product pages in vendor catalogs, downloads each product's
/// images and technical assets into named folders, and sorts those folders
/// into a category/format tree.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A product catalog harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk a vendor catalog and write its product links
    Discover {
        /// Vendor to crawl (villagres, biancogres)
        #[arg(long, default_value = "villagres")]
        vendor: Vendor,

        /// Link file to write (defaults to the vendor's link file)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Download every product listed in a URL file
    Scrape {
        /// Vendor assumed for URLs on unknown hosts
        #[arg(long, default_value = "villagres")]
        vendor: Vendor,

        /// Directory that receives the product folders
        #[arg(long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// URL list, one per line (defaults to the vendor's link file)
        #[arg(value_name = "URL_FILE")]
        url_file: Option<PathBuf>,
    },

    /// Sort downloaded product folders into a category/format tree
    Organize {
        /// Directory to organize (defaults to the executable's directory)
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_deref())?;

    match cli.command {
        Command::Discover { vendor, output } => handle_discover(&config, vendor, output).await,
        Command::Scrape {
            vendor,
            output_dir,
            url_file,
        } => handle_scrape(&config, vendor, output_dir, url_file).await,
        Command::Organize { root } => handle_organize(&config, root),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvest=info,warn"),
            1 => EnvFilter::new("catalog_harvest=debug,info"),
            2 => EnvFilter::new("catalog_harvest=trace,debug"),
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

fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

/// Handles `discover`: crawls the catalog and writes the link file
async fn handle_discover(
    config: &Config,
    vendor: Vendor,
    output: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let output = output.unwrap_or_else(|| PathBuf::from(config.link_file(vendor)));

    let mut session = HttpPageSession::new(&config.session)?;
    let result = discover_to_file(&mut session, vendor, config, &output).await;
    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close session: {}", e);
    }

    let report = result.with_context(|| format!("Discovery for {} failed", vendor))?;
    print_discovery_summary(&report);
    Ok(ExitCode::SUCCESS)
}

/// Handles `scrape`: processes every URL of the input list
async fn handle_scrape(
    config: &Config,
    vendor: Vendor,
    output_dir: PathBuf,
    url_file: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let url_file = url_file.unwrap_or_else(|| PathBuf::from(config.link_file(vendor)));

    let urls = match read_url_list(&url_file, vendor.example_product_url()) {
        Ok(urls) => urls,
        Err(e) => {
            tracing::error!("Cannot read {}: {}", url_file.display(), e);
            return Ok(ExitCode::FAILURE);
        }
    };
    if urls.is_empty() {
        let empty = HarvestError::EmptyUrlList {
            path: url_file.display().to_string(),
        };
        tracing::error!("{}", empty);
        return Ok(ExitCode::FAILURE);
    }

    tracing::info!("Starting harvest of {} URLs", urls.len());
    let scraper = ProductScraper::new(config, output_dir)?.with_default_vendor(vendor);
    let factory = HttpSessionFactory::new(config.session.clone());
    let summary = scraper.run_batch(&factory, &urls).await;

    print_batch_summary(&summary);
    Ok(ExitCode::SUCCESS)
}

/// Handles `organize`: sorts product folders under the root
fn handle_organize(config: &Config, root: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let root = root.unwrap_or_else(executable_dir);

    match organize(&root, config) {
        Ok(summary) => print_organize_summary(&summary),
        Err(e) => tracing::error!("Organization of {} stopped: {}", root.display(), e),
    }
    Ok(ExitCode::SUCCESS)
}

fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
