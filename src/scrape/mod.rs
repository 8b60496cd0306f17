//! Profile scraping via browser automation
//!
//! This module handles:
//! - Launching an isolated headless browser session
//! - Scrolling a dynamic page until no more content loads
//! - Extracting and deduplicating post text with timestamps
//! - Routing URLs to the matching site profile
//!
//! Failures never escape: a scrape that cannot complete is logged and
//! reported as an empty outcome.

mod chrome;
mod driver;
mod extract;
mod scroll;
mod sites;
mod types;

pub use chrome::ChromeDriver;
pub use driver::{wait_for_element, PageDriver};
pub use extract::{rendered_text, ItemError, ItemExtractor, ItemSnapshot};
pub use scroll::{collect_items, resolve_item_selector, scrape_page, ItemCollector};
pub use sites::{dispatch, scrape_site, SiteProfile, SITES, X_PROFILE};
pub use types::{ScrapeOptions, ScrapeOutcome, ScrapedItem, StopReason};

/// Scrapes one page in a fresh browser session
///
/// The session is launched, used for a single [`scrape_page`] run, and closed
/// before returning.
pub async fn scrape_dynamic_site(
    url: &str,
    site: &SiteProfile,
    options: &ScrapeOptions,
) -> ScrapeOutcome {
    let mut driver = match ChromeDriver::launch(options).await {
        Ok(driver) => driver,
        Err(e) => {
            tracing::error!("Browser scraping error: {}", e);
            return ScrapeOutcome::empty(StopReason::Failed);
        }
    };

    scrape_with_driver(&mut driver, url, site, options).await
}

/// Scrapes one page on an open session, then closes it
///
/// The session is closed on both the success and failure paths. A failed
/// close is logged; the scrape result stands.
pub async fn scrape_with_driver<D: PageDriver + ?Sized>(
    driver: &mut D,
    url: &str,
    site: &SiteProfile,
    options: &ScrapeOptions,
) -> ScrapeOutcome {
    let result = scrape_page(driver, url, site, options).await;

    if let Err(e) = driver.close().await {
        tracing::warn!("Failed to close browser session: {}", e);
    }

    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Browser scraping error: {}", e);
            ScrapeOutcome::empty(StopReason::Failed)
        }
    }
}
