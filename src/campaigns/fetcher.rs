//! Marketing API client
//!
//! Issues a single authenticated GET against the campaigns endpoint. There is
//! no pagination, no retry, and no rate limiting.

use crate::campaigns::types::{Campaign, CampaignsResponse};
use crate::config::MailchimpConfig;
use crate::CampaignError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

const USER_AGENT: &str = concat!("campaign-sync/", env!("CARGO_PKG_VERSION"));

/// Client for the campaigns endpoint of one account
#[derive(Debug, Clone)]
pub struct CampaignClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl CampaignClient {
    /// Builds a client from the marketing API configuration
    ///
    /// # Returns
    ///
    /// * `Ok(CampaignClient)` - Client targeting `<api root>/3.0/campaigns`
    /// * `Err(CampaignError)` - No API root could be determined, or the HTTP
    ///   client failed to build
    pub fn new(config: &MailchimpConfig) -> Result<Self, CampaignError> {
        let root = config.api_root().ok_or_else(|| {
            CampaignError::Payload("cannot determine the API data center".to_string())
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/3.0/campaigns", root),
            api_key: config.api_key.clone(),
        })
    }

    /// The full campaigns URL this client requests
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Requests the campaign list, surfacing every failure as an error
    pub async fn try_fetch(&self) -> Result<Vec<Campaign>, CampaignError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("apikey {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(CampaignError::Status {
                url: self.endpoint.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: CampaignsResponse = serde_json::from_str(&body)
            .map_err(|e| CampaignError::Payload(e.to_string()))?;

        Ok(parsed.campaigns.into_iter().map(Campaign::from).collect())
    }

    /// Requests the campaign list, degrading to an empty list on any failure
    ///
    /// A non-200 response logs the response body. Publishing continues with
    /// zero campaign rows either way.
    pub async fn fetch_campaigns(&self) -> Vec<Campaign> {
        match self.try_fetch().await {
            Ok(campaigns) => {
                tracing::info!("Fetched {} campaigns", campaigns.len());
                campaigns
            }
            Err(CampaignError::Status { status, body, .. }) => {
                tracing::error!("Error fetching Mailchimp data ({}): {}", status, body);
                Vec::new()
            }
            Err(e) => {
                tracing::error!("Error fetching Mailchimp data: {}", e);
                Vec::new()
            }
        }
    }
}
