//! Run orchestration
//!
//! A run is strictly sequential: scrape (or load a snapshot), fetch
//! campaigns, publish, report. Scrape and campaign failures degrade to empty
//! data; only configuration, snapshot, and publishing failures end the run.

use crate::campaigns::{fetch_campaigns, Campaign};
use crate::config::Config;
use crate::output::{load_snapshot, save_snapshot};
use crate::scrape::{scrape_site, ScrapeOptions, StopReason};
use crate::sheets::{build_rows, open_sheet, publish, ScrapedData};
use crate::SyncError;
use std::path::PathBuf;
use tracing::{error, info};

/// Per-run choices made on the command line
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Scrape this URL instead of the configured one
    pub url_override: Option<String>,

    /// Publish data from this snapshot instead of scraping
    pub from_snapshot: Option<PathBuf>,

    /// Write scraped data to this snapshot
    pub save_snapshot: Option<PathBuf>,

    /// Skip the spreadsheet entirely
    pub dry_run: bool,
}

/// How the scrape ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeStats {
    pub scrolls: u32,
    pub stop: StopReason,
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub campaigns: Vec<Campaign>,
    pub data: ScrapedData,

    /// `None` when data came from a snapshot
    pub scrape: Option<ScrapeStats>,

    /// `None` on a dry run
    pub rows_written: Option<usize>,
}

/// Runs one full sync
///
/// # Arguments
///
/// * `config` - Validated configuration
/// * `options` - Command-line choices for this run
///
/// # Returns
///
/// * `Ok(RunReport)` - What was fetched, scraped, and written
/// * `Err(SyncError)` - A snapshot could not be loaded or publishing failed
pub async fn run_sync(config: &Config, options: &RunOptions) -> Result<RunReport, SyncError> {
    let (data, scrape) = match &options.from_snapshot {
        Some(path) => (load_snapshot(path)?, None),
        None => {
            let url = options
                .url_override
                .as_deref()
                .unwrap_or(config.scraper.url.as_str());
            let outcome = scrape_site(url, &ScrapeOptions::from(&config.scraper)).await;
            let stats = ScrapeStats {
                scrolls: outcome.scrolls,
                stop: outcome.stop,
            };
            (ScrapedData::Items(outcome.items), Some(stats))
        }
    };

    if let Some(path) = &options.save_snapshot {
        if let Err(e) = save_snapshot(&data, path) {
            error!("Failed to save snapshot: {}", e);
        }
    }

    let campaigns = fetch_campaigns(&config.mailchimp).await;

    let rows_written = if options.dry_run {
        info!(
            "Dry run: would write {} rows to '{}'",
            build_rows(&campaigns, &data).len(),
            config.sheets.spreadsheet_name
        );
        None
    } else {
        let mut sheet = open_sheet(&config.sheets).await?;
        Some(publish(&mut sheet, &campaigns, &data).await?)
    };

    Ok(RunReport {
        campaigns,
        data,
        scrape,
        rows_written,
    })
}
