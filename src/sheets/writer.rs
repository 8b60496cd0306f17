//! Sheet writer seam and the publish sequence

use crate::campaigns::Campaign;
use crate::sheets::layout::{build_rows, Cell, ScrapedData};
use crate::SheetResult;
use async_trait::async_trait;

/// Destructive write access to one sheet
#[async_trait]
pub trait SheetWriter: Send {
    /// Removes all existing content
    async fn clear(&mut self) -> SheetResult<()>;

    /// Appends one row after the last non-empty row
    async fn append_row(&mut self, row: &[Cell]) -> SheetResult<()>;
}

/// Overwrites the sheet with the campaign rows followed by the scraped rows
///
/// Clear-then-append is not atomic: a failure part way through leaves the
/// sheet partially written.
///
/// # Arguments
///
/// * `writer` - The sheet to overwrite
/// * `campaigns` - Campaign rows, written first
/// * `data` - Scraped items or raw strings, written under the section label
///
/// # Returns
///
/// * `Ok(usize)` - Number of rows appended
/// * `Err(SheetError)` - The first failing write
pub async fn publish<W: SheetWriter + ?Sized>(
    writer: &mut W,
    campaigns: &[Campaign],
    data: &ScrapedData,
) -> SheetResult<usize> {
    let rows = build_rows(campaigns, data);

    writer.clear().await?;
    for row in &rows {
        writer.append_row(row).await?;
    }

    tracing::info!("Google Sheets updated successfully ({} rows)", rows.len());
    Ok(rows.len())
}
