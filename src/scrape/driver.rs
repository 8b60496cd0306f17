//! Browser driver seam
//!
//! The scroll loop only talks to a [`PageDriver`], so it can run against a
//! real browser or a scripted fake.

use crate::{ScrapeError, ScrapeResult};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

/// Operations the scraper needs from a browser session
#[async_trait]
pub trait PageDriver: Send {
    /// Loads the URL in the session's page
    async fn navigate(&mut self, url: &str) -> ScrapeResult<()>;

    /// Returns true if at least one element matches the CSS selector
    async fn has_element(&mut self, selector: &str) -> ScrapeResult<bool>;

    /// Returns the current serialized DOM
    async fn page_source(&mut self) -> ScrapeResult<String>;

    /// Scrolls the window to the bottom of the document
    async fn scroll_to_bottom(&mut self) -> ScrapeResult<()>;

    /// Returns the document body's scroll height
    async fn page_height(&mut self) -> ScrapeResult<u64>;

    /// Ends the session
    async fn close(&mut self) -> ScrapeResult<()>;
}

/// Polls until an element matching `selector` is present
///
/// The selector is checked at least once, then every `poll_interval` until
/// `timeout` has elapsed.
///
/// # Returns
///
/// * `Ok(())` - The element appeared
/// * `Err(ScrapeError::SelectorTimeout)` - It did not appear in time
/// * `Err(ScrapeError)` - The driver failed while checking
pub async fn wait_for_element<D: PageDriver + ?Sized>(
    driver: &mut D,
    selector: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> ScrapeResult<()> {
    let deadline = Instant::now() + timeout;

    loop {
        if driver.has_element(selector).await? {
            return Ok(());
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(ScrapeError::SelectorTimeout {
                selector: selector.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }

        tokio::time::sleep(poll_interval.min(deadline - now)).await;
    }
}
