//! Campaign API tests

use campaign_sync::campaigns::{fetch_campaigns, CampaignClient};
use campaign_sync::config::MailchimpConfig;
use campaign_sync::CampaignError;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::campaigns_body;

fn mailchimp_config(base_url: &str) -> MailchimpConfig {
    MailchimpConfig {
        api_key: "abc123-us3".to_string(),
        datacenter: None,
        base_url: Some(base_url.to_string()),
    }
}

#[tokio::test]
async fn test_fetch_campaign_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/campaigns"))
        .and(header("Authorization", "apikey abc123-us3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(campaigns_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let campaigns = fetch_campaigns(&mailchimp_config(&mock_server.uri())).await;

    assert_eq!(campaigns.len(), 1);
    let campaign = &campaigns[0];
    assert_eq!(campaign.title, "A");
    assert_eq!(campaign.status, "sent");
    assert_eq!(campaign.emails_sent, 100);
    assert_eq!(campaign.open_rate, 0.5);
    assert_eq!(campaign.click_rate, 0.1);
}

#[tokio::test]
async fn test_draft_without_report_summary() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "campaigns": [{
                "id": "d1",
                "status": "save",
                "emails_sent": 0,
                "settings": {"title": "Draft"}
            }]
        })))
        .mount(&mock_server)
        .await;

    let campaigns = fetch_campaigns(&mailchimp_config(&mock_server.uri())).await;

    assert_eq!(campaigns.len(), 1);
    assert_eq!(campaigns[0].title, "Draft");
    assert_eq!(campaigns[0].open_rate, 0.0);
    assert_eq!(campaigns[0].click_rate, 0.0);
}

#[tokio::test]
async fn test_empty_campaign_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"campaigns": []})))
        .mount(&mock_server)
        .await;

    let campaigns = fetch_campaigns(&mailchimp_config(&mock_server.uri())).await;
    assert!(campaigns.is_empty());
}

#[tokio::test]
async fn test_server_error_yields_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/campaigns"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let config = mailchimp_config(&mock_server.uri());
    assert!(fetch_campaigns(&config).await.is_empty());

    let client = CampaignClient::new(&config).unwrap();
    match client.try_fetch().await {
        Err(CampaignError::Status { status, body, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unauthorized_yields_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/campaigns"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "title": "API Key Invalid",
            "status": 401
        })))
        .mount(&mock_server)
        .await;

    assert!(fetch_campaigns(&mailchimp_config(&mock_server.uri()))
        .await
        .is_empty());
}

#[tokio::test]
async fn test_malformed_payload_yields_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    assert!(fetch_campaigns(&mailchimp_config(&mock_server.uri()))
        .await
        .is_empty());
}

#[tokio::test]
async fn test_unreachable_server_yields_empty_list() {
    // Nothing listens on port 1
    let config = mailchimp_config("http://127.0.0.1:1");
    assert!(fetch_campaigns(&config).await.is_empty());
}
