//! Scraped items, scrape options, and scrape outcomes

use crate::config::ScraperConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// One post extracted from a profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedItem {
    /// Trimmed, non-empty post text
    pub text: String,

    /// Machine-readable datetime of the post, when the page carries one
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Knobs for one scrape invocation
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Pause after each scroll before the page height is re-read
    pub scroll_pause: Duration,

    /// Upper bound on scroll iterations
    pub max_scroll_attempts: u32,

    pub headless: bool,

    /// Delay after the document body appears
    pub settle_delay: Duration,

    /// Bound on each element-presence wait
    pub wait_timeout: Duration,

    /// Interval between element-presence checks
    pub poll_interval: Duration,

    /// Browser window size (width, height)
    pub window_size: (u32, u32),

    pub chrome_executable: Option<PathBuf>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            scroll_pause: Duration::from_secs(3),
            max_scroll_attempts: 30,
            headless: true,
            settle_delay: Duration::from_secs(2),
            wait_timeout: Duration::from_secs(20),
            poll_interval: Duration::from_millis(500),
            window_size: (1920, 1080),
            chrome_executable: None,
        }
    }
}

impl From<&ScraperConfig> for ScrapeOptions {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            scroll_pause: config.scroll_pause(),
            max_scroll_attempts: config.max_scroll_attempts,
            headless: config.headless,
            settle_delay: config.settle_delay(),
            wait_timeout: config.wait_timeout(),
            chrome_executable: config.chrome_executable.clone(),
            ..Self::default()
        }
    }
}

/// Why a scrape stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Page height did not change after a scroll
    HeightStable,

    /// The scroll attempt cap was reached
    AttemptsExhausted,

    /// The scrape aborted; items collected so far were discarded
    Failed,

    /// No site profile matched the URL
    Unsupported,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::HeightStable => "page height stable",
            Self::AttemptsExhausted => "scroll attempts exhausted",
            Self::Failed => "scrape failed",
            Self::Unsupported => "unsupported URL",
        };
        f.write_str(s)
    }
}

/// Result of one scrape invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeOutcome {
    /// Distinct items in first-seen order
    pub items: Vec<ScrapedItem>,

    /// Number of scroll commands issued
    pub scrolls: u32,

    pub stop: StopReason,
}

impl ScrapeOutcome {
    /// An outcome carrying no items
    pub fn empty(stop: StopReason) -> Self {
        Self {
            items: Vec::new(),
            scrolls: 0,
            stop,
        }
    }
}
