//! Spreadsheet publishing
//!
//! This module handles:
//! - Service-account authentication against the spreadsheet service
//! - Opening a spreadsheet by name and selecting its first sheet
//! - Laying out campaign and scraped rows
//! - Overwriting the sheet with those rows

mod auth;
mod client;
mod layout;
mod writer;

pub use auth::{fetch_access_token, AccessToken, AssertionClaims, ServiceAccountKey, SCOPES};
pub use client::GoogleSheet;
pub use layout::{
    build_rows, Cell, Row, ScrapedData, CAMPAIGN_HEADER, ITEM_HEADER, MISSING_TIMESTAMP,
    SECTION_LABEL,
};
pub use writer::{publish, SheetWriter};

use crate::config::SheetsConfig;
use crate::SheetResult;
use reqwest::Client;
use std::time::Duration;

/// Authenticates and opens the configured spreadsheet's first sheet
///
/// # Arguments
///
/// * `config` - Key file path, spreadsheet name, and API base URLs
///
/// # Returns
///
/// * `Ok(GoogleSheet)` - Ready for [`publish`]
/// * `Err(SheetError)` - The key could not be read, the token exchange was
///   refused, or the spreadsheet could not be found
pub async fn open_sheet(config: &SheetsConfig) -> SheetResult<GoogleSheet> {
    let key = ServiceAccountKey::from_file(&config.credentials_file)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()?;

    let token = fetch_access_token(&client, &key, SCOPES).await?;

    GoogleSheet::open_by_name(
        client,
        &token,
        &config.sheets_base_url,
        &config.drive_base_url,
        &config.spreadsheet_name,
    )
    .await
}
