use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Campaign-Sync
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub mailchimp: MailchimpConfig,
    pub sheets: SheetsConfig,
    pub scraper: ScraperConfig,
}

/// Marketing API credentials and endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct MailchimpConfig {
    /// Full API key, e.g. `abc123-us3`
    #[serde(rename = "api-key")]
    pub api_key: String,

    /// Data center prefix; derived from the API key suffix when absent
    #[serde(default)]
    pub datacenter: Option<String>,

    /// Overrides `https://<datacenter>.api.mailchimp.com`
    #[serde(rename = "base-url", default)]
    pub base_url: Option<String>,
}

impl MailchimpConfig {
    /// Returns the configured data center, or the suffix after the last `-`
    /// of the API key
    ///
    /// # Returns
    ///
    /// * `Some(String)` - Trimmed, non-empty data center, e.g. `us3`
    /// * `None` - Not configured and the key has no `-<dc>` suffix
    pub fn resolved_datacenter(&self) -> Option<String> {
        if let Some(dc) = &self.datacenter {
            return Some(dc.trim().to_string()).filter(|dc| !dc.is_empty());
        }

        self.api_key
            .rsplit_once('-')
            .map(|(_, dc)| dc.trim().to_string())
            .filter(|dc| !dc.is_empty())
    }

    /// Returns the API root, without the `/3.0` version segment
    pub fn api_root(&self) -> Option<String> {
        if let Some(base) = &self.base_url {
            return Some(base.trim_end_matches('/').to_string());
        }

        self.resolved_datacenter()
            .map(|dc| format!("https://{}.api.mailchimp.com", dc))
    }
}

/// Spreadsheet destination and service-account credentials
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    /// Path to the service-account JSON key file
    #[serde(rename = "credentials-file")]
    pub credentials_file: PathBuf,

    /// Name of the target spreadsheet
    #[serde(rename = "spreadsheet-name")]
    pub spreadsheet_name: String,

    /// Sheets API root; overridden in tests
    #[serde(rename = "sheets-base-url", default = "default_sheets_base_url")]
    pub sheets_base_url: String,

    /// Drive API root, used to find the spreadsheet by name
    #[serde(rename = "drive-base-url", default = "default_drive_base_url")]
    pub drive_base_url: String,
}

/// Profile scraping behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Profile page to scrape
    pub url: String,

    /// Pause after each scroll before the page height is re-read (milliseconds)
    #[serde(rename = "scroll-pause-ms", default = "default_scroll_pause_ms")]
    pub scroll_pause_ms: u64,

    /// Upper bound on scroll iterations
    #[serde(rename = "max-scroll-attempts", default = "default_max_scroll_attempts")]
    pub max_scroll_attempts: u32,

    /// Run the browser without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Delay after the document body appears, for client-side rendering (milliseconds)
    #[serde(rename = "settle-delay-ms", default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Bound on each element-presence wait (seconds)
    #[serde(rename = "wait-timeout-secs", default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// Browser binary; detected from the usual install locations when absent
    #[serde(rename = "chrome-executable", default)]
    pub chrome_executable: Option<PathBuf>,
}

impl ScraperConfig {
    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_drive_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_scroll_pause_ms() -> u64 {
    3000
}

fn default_max_scroll_attempts() -> u32 {
    30
}

fn default_headless() -> bool {
    true
}

fn default_settle_delay_ms() -> u64 {
    2000
}

fn default_wait_timeout_secs() -> u64 {
    20
}
