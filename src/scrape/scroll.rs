//! Scroll-until-stable collection loop
//!
//! The loop is a small state machine:
//!
//! ```text
//! Extracting -> Scrolling -> HeightCheck -+-> Extracting   (height changed, attempts left)
//!                                         +-> Stopped       (height stable or cap reached)
//! ```
//!
//! Every extraction works from a fresh page snapshot, and items are
//! deduplicated by exact text across iterations.

use crate::scrape::driver::{wait_for_element, PageDriver};
use crate::scrape::extract::{ItemExtractor, ItemSnapshot};
use crate::scrape::sites::SiteProfile;
use crate::scrape::types::{ScrapeOptions, ScrapeOutcome, ScrapedItem, StopReason};
use crate::{ScrapeError, ScrapeResult};
use std::collections::HashSet;
use tracing::{debug, error, info};

/// Phases of the collection loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Extracting,
    Scrolling,
    HeightCheck,
    Stopped(StopReason),
}

/// Accumulates distinct items in first-seen order
#[derive(Debug, Default)]
pub struct ItemCollector {
    seen: HashSet<String>,
    items: Vec<ScrapedItem>,
}

impl ItemCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot if its text is non-empty and not yet seen
    ///
    /// An item whose timestamp lookup failed is logged and skipped; its text
    /// is not marked as seen, so a later snapshot may still record it.
    ///
    /// # Returns
    ///
    /// `true` if the item was recorded
    pub fn offer(&mut self, snapshot: ItemSnapshot) -> bool {
        if snapshot.text.is_empty() || self.seen.contains(&snapshot.text) {
            return false;
        }

        match snapshot.timestamp {
            Ok(timestamp) => {
                self.seen.insert(snapshot.text.clone());
                self.items.push(ScrapedItem {
                    text: snapshot.text,
                    timestamp,
                });
                true
            }
            Err(e) => {
                error!("Tweet extraction error (item {}): {}", snapshot.index, e);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<ScrapedItem> {
        self.items
    }
}

/// Picks the item selector the page actually uses
///
/// Waits for the profile's preferred selector, then for its fallback.
///
/// # Returns
///
/// * `Ok(&str)` - The first selector that appeared
/// * `Err(ScrapeError::SelectorTimeout)` - Neither appeared in time
pub async fn resolve_item_selector<D: PageDriver + ?Sized>(
    driver: &mut D,
    site: &SiteProfile,
    options: &ScrapeOptions,
) -> ScrapeResult<&'static str> {
    match wait_for_element(
        driver,
        site.item_selector,
        options.wait_timeout,
        options.poll_interval,
    )
    .await
    {
        Ok(()) => Ok(site.item_selector),
        Err(ScrapeError::SelectorTimeout { .. }) => {
            debug!(
                "Selector '{}' never appeared, falling back to '{}'",
                site.item_selector, site.fallback_item_selector
            );
            wait_for_element(
                driver,
                site.fallback_item_selector,
                options.wait_timeout,
                options.poll_interval,
            )
            .await?;
            Ok(site.fallback_item_selector)
        }
        Err(e) => Err(e),
    }
}

/// Scrolls and extracts until the page stops growing or the attempt cap is hit
///
/// The page height is read once before the first iteration. Each iteration
/// extracts from a fresh snapshot, scrolls to the bottom, waits
/// `scroll_pause`, and compares the new height to the previous one.
///
/// # Arguments
///
/// * `driver` - An open session already showing the page
/// * `extractor` - Selectors for the resolved item container
/// * `options` - Pause duration and attempt cap
///
/// # Returns
///
/// * `Ok(ScrapeOutcome)` - Distinct items in first-seen order, the number of
///   scrolls issued, and why the loop stopped
/// * `Err(ScrapeError)` - The driver failed; items collected so far are dropped
pub async fn collect_items<D: PageDriver + ?Sized>(
    driver: &mut D,
    extractor: &ItemExtractor,
    options: &ScrapeOptions,
) -> ScrapeResult<ScrapeOutcome> {
    let mut collector = ItemCollector::new();
    let mut last_height = driver.page_height().await?;
    let mut scrolls = 0u32;
    let mut phase = if options.max_scroll_attempts == 0 {
        Phase::Stopped(StopReason::AttemptsExhausted)
    } else {
        Phase::Extracting
    };

    loop {
        phase = match phase {
            Phase::Extracting => {
                let html = driver.page_source().await?;
                let before = collector.len();
                for snapshot in extractor.extract(&html) {
                    collector.offer(snapshot);
                }
                debug!(
                    "Iteration {}: {} new items ({} total)",
                    scrolls + 1,
                    collector.len() - before,
                    collector.len()
                );
                Phase::Scrolling
            }
            Phase::Scrolling => {
                driver.scroll_to_bottom().await?;
                scrolls += 1;
                tokio::time::sleep(options.scroll_pause).await;
                Phase::HeightCheck
            }
            Phase::HeightCheck => {
                let new_height = driver.page_height().await?;
                if new_height == last_height {
                    Phase::Stopped(StopReason::HeightStable)
                } else if scrolls >= options.max_scroll_attempts {
                    Phase::Stopped(StopReason::AttemptsExhausted)
                } else {
                    last_height = new_height;
                    Phase::Extracting
                }
            }
            Phase::Stopped(stop) => {
                info!(
                    "Collected {} items after {} scrolls ({})",
                    collector.len(),
                    scrolls,
                    stop
                );
                return Ok(ScrapeOutcome {
                    items: collector.into_items(),
                    scrolls,
                    stop,
                });
            }
        };
    }
}

/// Runs a full scrape of one page on an already-open session
///
/// Navigates, waits for the document body, lets client-side rendering
/// settle, resolves the item selector, then runs [`collect_items`]. The
/// session is left open.
pub async fn scrape_page<D: PageDriver + ?Sized>(
    driver: &mut D,
    url: &str,
    site: &SiteProfile,
    options: &ScrapeOptions,
) -> ScrapeResult<ScrapeOutcome> {
    driver.navigate(url).await?;
    wait_for_element(driver, "body", options.wait_timeout, options.poll_interval).await?;
    tokio::time::sleep(options.settle_delay).await;

    let item_selector = resolve_item_selector(driver, site, options).await?;
    debug!("Using item selector '{}'", item_selector);

    let extractor = ItemExtractor::new(item_selector, site)?;
    collect_items(driver, &extractor, options).await
}
