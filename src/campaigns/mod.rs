//! Campaign metrics from the marketing API
//!
//! This module handles:
//! - Building the authenticated campaigns request
//! - Decoding campaign records from the response
//! - Degrading to an empty list when the API is unavailable

mod fetcher;
mod types;

pub use fetcher::CampaignClient;
pub use types::Campaign;

use crate::config::MailchimpConfig;

/// Fetches all campaigns for the configured account
///
/// Never fails: a client that cannot be built, a transport failure, or a
/// non-200 response is logged and yields an empty list.
///
/// # Arguments
///
/// * `config` - API key and data center or base URL override
pub async fn fetch_campaigns(config: &MailchimpConfig) -> Vec<Campaign> {
    match CampaignClient::new(config) {
        Ok(client) => client.fetch_campaigns().await,
        Err(e) => {
            tracing::error!("Error fetching Mailchimp data: {}", e);
            Vec::new()
        }
    }
}
