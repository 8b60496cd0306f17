//! Output module for run results
//!
//! This module handles:
//! - Printing scraped items and a run summary to the console
//! - Saving and loading JSON snapshots of scraped data

mod console;
mod snapshot;

pub use console::{format_items, print_items, print_run_report};
pub use snapshot::{load_snapshot, save_snapshot};
