//! Sheet row layout
//!
//! Builds the exact sequence of rows written to the sheet. This is pure so
//! the layout can be checked without a spreadsheet.

use crate::campaigns::Campaign;
use crate::scrape::ScrapedItem;
use serde::{Deserialize, Serialize};

pub const CAMPAIGN_HEADER: [&str; 5] = [
    "Campaign Name",
    "Status",
    "Emails Sent",
    "Open Rate",
    "Click Rate",
];
pub const SECTION_LABEL: &str = "Scraped Tweet Data";
pub const ITEM_HEADER: [&str; 2] = ["Timestamp", "Tweet Text"];
pub const MISSING_TIMESTAMP: &str = "N/A";

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(u64),
    Number(f64),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// One row of cells
pub type Row = Vec<Cell>;

/// Scraped data in one of the two shapes the sheet accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapedData {
    /// Structured posts, written under a timestamp/text header
    Items(Vec<ScrapedItem>),

    /// Plain strings, written one per row with no header
    Raw(Vec<String>),
}

impl ScrapedData {
    pub fn len(&self) -> usize {
        match self {
            Self::Items(items) => items.len(),
            Self::Raw(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ScrapedData {
    fn default() -> Self {
        Self::Items(Vec::new())
    }
}

impl From<Vec<ScrapedItem>> for ScrapedData {
    fn from(items: Vec<ScrapedItem>) -> Self {
        Self::Items(items)
    }
}

/// Builds every row of the sheet, in write order
///
/// # Layout
///
/// 1. Campaign header
/// 2. One row per campaign
/// 3. A blank separator row as wide as the campaign header
/// 4. The section label
/// 5. For structured items: the item header, then one row per item. For raw
///    strings: one single-cell row per string. Nothing when there is no data.
pub fn build_rows(campaigns: &[Campaign], data: &ScrapedData) -> Vec<Row> {
    let mut rows = Vec::with_capacity(campaigns.len() + data.len() + 4);

    rows.push(text_row(&CAMPAIGN_HEADER));
    rows.extend(campaigns.iter().map(campaign_row));
    rows.push(vec![Cell::from(""); CAMPAIGN_HEADER.len()]);
    rows.push(text_row(&[SECTION_LABEL]));

    match data {
        ScrapedData::Items(items) if !items.is_empty() => {
            rows.push(text_row(&ITEM_HEADER));
            rows.extend(items.iter().map(item_row));
        }
        ScrapedData::Items(_) => {}
        ScrapedData::Raw(values) => {
            rows.extend(values.iter().map(|v| vec![Cell::from(v.as_str())]));
        }
    }

    rows
}

fn text_row(values: &[&str]) -> Row {
    values.iter().map(|v| Cell::from(*v)).collect()
}

fn campaign_row(campaign: &Campaign) -> Row {
    vec![
        Cell::from(campaign.title.as_str()),
        Cell::from(campaign.status.as_str()),
        Cell::Integer(campaign.emails_sent),
        Cell::Number(campaign.open_rate),
        Cell::Number(campaign.click_rate),
    ]
}

fn item_row(item: &ScrapedItem) -> Row {
    vec![
        Cell::from(item.timestamp.as_deref().unwrap_or(MISSING_TIMESTAMP)),
        Cell::from(item.text.as_str()),
    ]
}
