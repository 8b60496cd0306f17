//! JSON snapshots of scraped data
//!
//! A snapshot lets a run publish previously scraped data without launching a
//! browser. Files hold either an array of `{text, timestamp}` objects or an
//! array of plain strings.

use crate::sheets::ScrapedData;
use crate::SyncError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Writes scraped data as pretty-printed JSON
pub fn save_snapshot(data: &ScrapedData, path: &Path) -> Result<(), SyncError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data).map_err(|e| snapshot_error(path, e))?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Saved {} items to {}", data.len(), path.display());
    Ok(())
}

/// Reads scraped data from a JSON snapshot
///
/// # Arguments
///
/// * `path` - A file written by [`save_snapshot`] or a JSON array of strings
///
/// # Returns
///
/// * `Ok(ScrapedData::Items)` - The file holds `{text, timestamp}` objects
/// * `Ok(ScrapedData::Raw)` - The file holds plain strings
/// * `Err(SyncError::Snapshot)` - The file holds anything else
/// * `Err(SyncError::Io)` - The file could not be opened
pub fn load_snapshot(path: &Path) -> Result<ScrapedData, SyncError> {
    let file = File::open(path)?;
    let data: ScrapedData =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| snapshot_error(path, e))?;

    tracing::info!("Loaded {} items from {}", data.len(), path.display());
    Ok(data)
}

fn snapshot_error(path: &Path, e: serde_json::Error) -> SyncError {
    SyncError::Snapshot {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
