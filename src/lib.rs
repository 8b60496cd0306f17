//! Campaign-Sync: campaign metrics and profile posts, published to a spreadsheet
//!
//! This crate fetches email-campaign metrics from Mailchimp, scrapes post text
//! from a social-media profile with a headless browser, and writes both
//! datasets into a Google Sheet.

pub mod campaigns;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod scrape;
pub mod sheets;

use thiserror::Error;

/// Main error type for Campaign-Sync operations
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Campaign API error: {0}")]
    Campaign(#[from] CampaignError),

    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Spreadsheet error: {0}")]
    Sheet(#[from] SheetError),

    #[error("Snapshot error for {path}: {message}")]
    Snapshot { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors from the marketing API
#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Malformed campaign payload: {0}")]
    Payload(String),
}

/// Browser and extraction errors
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Browser protocol error: {0}")]
    Browser(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Timed out after {timeout_secs}s waiting for selector '{selector}'")]
    SelectorTimeout { selector: String, timeout_secs: u64 },

    #[error("Script evaluation failed: {0}")]
    Script(String),

    #[error("Invalid selector '{0}'")]
    InvalidSelector(String),
}

/// Spreadsheet service errors
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Failed to read credentials file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid service account key: {0}")]
    Credentials(String),

    #[error("Failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Spreadsheet API returned {status} for {url}: {body}")]
    Api {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    #[error("Spreadsheet {0} has no sheets")]
    NoSheets(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Result type alias for Campaign-Sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for scraping operations
pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for spreadsheet operations
pub type SheetResult<T> = std::result::Result<T, SheetError>;

// Re-export commonly used types
pub use campaigns::Campaign;
pub use config::Config;
pub use scrape::{ScrapeOptions, ScrapedItem};
pub use sheets::{Cell, ScrapedData};
