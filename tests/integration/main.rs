//! Integration tests for the HTTP collaborators and the run pipeline
//!
//! These tests use wiremock to stand in for the marketing API, the OAuth
//! token endpoint, and the Drive and Sheets APIs.

mod campaign_tests;
mod sheets_tests;

use campaign_sync::config::{Config, MailchimpConfig, ScraperConfig, SheetsConfig};
use serde_json::json;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/service_account_key.pem");
pub const SPREADSHEET_ID: &str = "sheet-123";

/// Creates a test configuration pointing every endpoint at the mock server
pub fn create_test_config(base_url: &str, credentials_file: &Path) -> Config {
    Config {
        mailchimp: MailchimpConfig {
            api_key: "abc123-us3".to_string(),
            datacenter: None,
            base_url: Some(base_url.to_string()),
        },
        sheets: SheetsConfig {
            credentials_file: credentials_file.to_path_buf(),
            spreadsheet_name: "Weekly Digest".to_string(),
            sheets_base_url: base_url.to_string(),
            drive_base_url: base_url.to_string(),
        },
        scraper: ScraperConfig {
            url: "https://x.com/someone".to_string(),
            scroll_pause_ms: 0,
            max_scroll_attempts: 3,
            headless: true,
            settle_delay_ms: 0,
            wait_timeout_secs: 1,
            chrome_executable: None,
        },
    }
}

/// Writes a service-account key file whose token endpoint is the mock server
pub fn create_key_file(base_url: &str) -> NamedTempFile {
    let key = json!({
        "type": "service_account",
        "project_id": "test-project",
        "private_key_id": "key-1",
        "private_key": TEST_PRIVATE_KEY,
        "client_email": "publisher@test-project.iam.gserviceaccount.com",
        "token_uri": format!("{}/token", base_url),
    });

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(key.to_string().as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// A campaigns response with one sent campaign
pub fn campaigns_body() -> serde_json::Value {
    json!({
        "campaigns": [{
            "id": "c1",
            "status": "sent",
            "emails_sent": 100,
            "settings": {"title": "A"},
            "report_summary": {"open_rate": 0.5, "click_rate": 0.1}
        }],
        "total_items": 1
    })
}

/// Mounts the token, file-lookup, and sheet-metadata endpoints
pub async fn mount_sheet_lookup(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{"id": SPREADSHEET_ID, "name": "Weekly Digest"}]
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{}", SPREADSHEET_ID)))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sheets": [
                {"properties": {"sheetId": 0, "title": "Sheet1", "index": 0}},
                {"properties": {"sheetId": 7, "title": "Archive", "index": 1}}
            ]
        })))
        .mount(mock_server)
        .await;
}

/// Mounts the clear and append endpoints with call-count expectations
pub async fn mount_sheet_writes(mock_server: &MockServer, expected_appends: u64) {
    Mock::given(method("POST"))
        .and(path_regex(format!(
            r"^/v4/spreadsheets/{}/values/.+:clear$",
            SPREADSHEET_ID
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(format!(
            r"^/v4/spreadsheets/{}/values/.+:append$",
            SPREADSHEET_ID
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(expected_appends)
        .mount(mock_server)
        .await;
}
