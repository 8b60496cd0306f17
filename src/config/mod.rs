//! TOML configuration
//!
//! A config file has three sections: `[mailchimp]` for the campaign API,
//! `[sheets]` for the destination spreadsheet, and `[scraper]` for the
//! profile page and scroll behavior. Files are validated on load.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use types::{Config, MailchimpConfig, ScraperConfig, SheetsConfig};
