//! Site profiles and URL dispatch
//!
//! A profile bundles everything the scraper needs to know about one site.
//! Supporting another site means adding an entry to [`SITES`].

use crate::scrape::types::{ScrapeOptions, ScrapeOutcome, StopReason};

/// Selectors describing how posts appear on one site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteProfile {
    pub name: &'static str,

    /// Substring that identifies URLs on this site
    pub url_pattern: &'static str,

    /// Preferred selector for individual post containers
    pub item_selector: &'static str,

    /// More generic selector tried when the preferred one never appears
    pub fallback_item_selector: &'static str,

    /// Element nested in a post that carries its timestamp
    pub timestamp_selector: &'static str,

    pub timestamp_attribute: &'static str,
}

/// X (formerly Twitter) profile timelines
pub const X_PROFILE: SiteProfile = SiteProfile {
    name: "x",
    url_pattern: "x.com",
    item_selector: "div[data-testid='tweet']",
    fallback_item_selector: "article",
    timestamp_selector: "time",
    timestamp_attribute: "datetime",
};

/// Every supported site, checked in order
pub const SITES: &[SiteProfile] = &[X_PROFILE];

/// Returns the first profile whose pattern occurs in the URL
///
/// # Arguments
///
/// * `url` - The page to scrape; matched by substring, not parsed
///
/// # Returns
///
/// * `Some(&SiteProfile)` - The first entry of [`SITES`] that matches
/// * `None` - No supported site matches
pub fn dispatch(url: &str) -> Option<&'static SiteProfile> {
    SITES.iter().find(|site| url.contains(site.url_pattern))
}

/// Scrapes a URL with the matching site profile
///
/// Unsupported URLs are logged and yield an empty outcome; this never fails.
///
/// # Arguments
///
/// * `url` - The profile page to scrape
/// * `options` - Scroll, wait, and browser settings
///
/// # Returns
///
/// The collected items with how the scroll loop stopped, or an empty
/// outcome with `StopReason::Unsupported` or `StopReason::Failed`
pub async fn scrape_site(url: &str, options: &ScrapeOptions) -> ScrapeOutcome {
    match dispatch(url) {
        Some(site) => {
            tracing::info!("Scraping {} with the '{}' profile", url, site.name);
            crate::scrape::scrape_dynamic_site(url, site, options).await
        }
        None => {
            tracing::error!("Unsupported URL format: {}", url);
            ScrapeOutcome::empty(StopReason::Unsupported)
        }
    }
}
