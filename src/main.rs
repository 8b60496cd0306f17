//! Campaign-Sync main entry point
//!
//! This is the command-line interface for the Campaign-Sync publisher.

use anyhow::Context;
use campaign_sync::config::{load_config_with_hash, Config};
use campaign_sync::output::{print_items, print_run_report};
use campaign_sync::pipeline::{run_sync, RunOptions};
use campaign_sync::scrape::dispatch;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Campaign-Sync: campaign metrics and profile posts in one spreadsheet
///
/// Fetches email-campaign metrics, scrapes recent posts from a profile page,
/// and overwrites the configured spreadsheet with both.
#[derive(Parser, Debug)]
#[command(name = "campaign-sync")]
#[command(version)]
#[command(about = "Publish campaign metrics and scraped posts to a spreadsheet", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Scrape this URL instead of the one in the config
    #[arg(long, value_name = "URL", conflicts_with = "from_snapshot")]
    url: Option<String>,

    /// Publish items from a JSON snapshot instead of scraping
    #[arg(long, value_name = "PATH")]
    from_snapshot: Option<PathBuf>,

    /// Save scraped items to a JSON snapshot
    #[arg(long, value_name = "PATH")]
    save_snapshot: Option<PathBuf>,

    /// Scrape and fetch, but do not touch the spreadsheet
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let options = RunOptions {
        url_override: cli.url,
        from_snapshot: cli.from_snapshot,
        save_snapshot: cli.save_snapshot,
        dry_run: cli.dry_run,
    };

    log_plan(&config, &options);

    let report = match run_sync(&config, &options).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            return Err(e.into());
        }
    };

    print_items(&report.data);
    if !cli.quiet {
        print_run_report(&report);
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
            0 => EnvFilter::new("campaign_sync=info,warn"),
            1 => EnvFilter::new("campaign_sync=debug,info"),
            2 => EnvFilter::new("campaign_sync=trace,debug"),
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

/// Logs what this run is about to do
fn log_plan(config: &Config, options: &RunOptions) {
    match &options.from_snapshot {
        Some(path) => tracing::info!("Items source: snapshot {}", path.display()),
        None => {
            let url = options.url_override.as_deref().unwrap_or(config.scraper.url.as_str());
            match dispatch(url) {
                Some(site) => tracing::info!("Items source: {} ('{}' profile)", url, site.name),
                None => tracing::warn!("Items source: {} (no matching site profile)", url),
            }
        }
    }

    if options.dry_run {
        tracing::info!("Dry run: the spreadsheet will not be modified");
    } else {
        tracing::info!("Target spreadsheet: {}", config.sheets.spreadsheet_name);
    }
}
