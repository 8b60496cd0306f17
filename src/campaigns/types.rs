//! Campaign records and the wire shapes they are decoded from

use serde::Deserialize;

/// One email campaign with its delivery and engagement metrics
#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    pub title: String,
    pub status: String,
    pub emails_sent: u64,
    pub open_rate: f64,
    pub click_rate: f64,
}

/// Body of `GET /3.0/campaigns`
#[derive(Debug, Deserialize)]
pub(crate) struct CampaignsResponse {
    pub campaigns: Vec<ApiCampaign>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCampaign {
    #[serde(default)]
    pub settings: ApiSettings,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub emails_sent: u64,
    /// Absent for campaigns that have never been sent
    #[serde(default)]
    pub report_summary: Option<ApiReportSummary>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiSettings {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiReportSummary {
    #[serde(default)]
    pub open_rate: f64,
    #[serde(default)]
    pub click_rate: f64,
}

impl From<ApiCampaign> for Campaign {
    fn from(api: ApiCampaign) -> Self {
        let report = api.report_summary.unwrap_or_default();
        Campaign {
            title: api.settings.title,
            status: api.status,
            emails_sent: api.emails_sent,
            open_rate: report.open_rate,
            click_rate: report.click_rate,
        }
    }
}
