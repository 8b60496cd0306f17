//! Console output for a finished run

use crate::pipeline::RunReport;
use crate::sheets::{ScrapedData, MISSING_TIMESTAMP};

/// Formats scraped data the way it is printed after a run
///
/// Returns an empty string when there is nothing to show.
pub fn format_items(data: &ScrapedData) -> String {
    if data.is_empty() {
        return String::new();
    }

    let mut out = String::from("\nRecent Tweet Data:\n");
    match data {
        ScrapedData::Items(items) => {
            for item in items {
                out.push_str(&format!(
                    "- {}: {}\n",
                    item.timestamp.as_deref().unwrap_or(MISSING_TIMESTAMP),
                    item.text
                ));
            }
        }
        ScrapedData::Raw(values) => {
            for value in values {
                out.push_str(&format!("- {}\n", value));
            }
        }
    }
    out
}

/// Prints scraped data to stdout
pub fn print_items(data: &ScrapedData) {
    print!("{}", format_items(data));
}

/// Prints a short summary of the run to stdout
pub fn print_run_report(report: &RunReport) {
    println!("\n=== Run Summary ===\n");
    println!("  Campaigns fetched: {}", report.campaigns.len());
    println!("  Items scraped: {}", report.data.len());
    match &report.scrape {
        Some(stats) => println!("  Scrolls: {} ({})", stats.scrolls, stats.stop),
        None => println!("  Scrolls: none (loaded from snapshot)"),
    }
    match report.rows_written {
        Some(rows) => println!("  Rows written: {}", rows),
        None => println!("  Rows written: none (dry run)"),
    }
}
