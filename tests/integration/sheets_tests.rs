//! Spreadsheet authentication and client tests

use campaign_sync::config::SheetsConfig;
use campaign_sync::sheets::{
    fetch_access_token, open_sheet, publish, Cell, ScrapedData, ServiceAccountKey, SheetWriter,
    SCOPES,
};
use campaign_sync::{Campaign, ScrapedItem, SheetError};
use reqwest::Client;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{create_key_file, mount_sheet_lookup, mount_sheet_writes, SPREADSHEET_ID};

fn sheets_config(base_url: &str, credentials_file: &std::path::Path) -> SheetsConfig {
    SheetsConfig {
        credentials_file: credentials_file.to_path_buf(),
        spreadsheet_name: "Weekly Digest".to_string(),
        sheets_base_url: base_url.to_string(),
        drive_base_url: base_url.to_string(),
    }
}

fn campaign() -> Campaign {
    Campaign {
        title: "A".to_string(),
        status: "sent".to_string(),
        emails_sent: 100,
        open_rate: 0.5,
        click_rate: 0.1,
    }
}

#[tokio::test]
async fn test_token_exchange() {
    let mock_server = MockServer::start().await;
    let key_file = create_key_file(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let key = ServiceAccountKey::from_file(key_file.path()).unwrap();
    let token = fetch_access_token(&Client::new(), &key, SCOPES)
        .await
        .unwrap();

    assert_eq!(token.token, "test-token");
    assert!(token.expires_at.is_some());
}

#[tokio::test]
async fn test_token_exchange_rejected() {
    let mock_server = MockServer::start().await;
    let key_file = create_key_file(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&mock_server)
        .await;

    let key = ServiceAccountKey::from_file(key_file.path()).unwrap();
    match fetch_access_token(&Client::new(), &key, SCOPES).await {
        Err(SheetError::Api { status, body, .. }) => {
            assert_eq!(status, 400);
            assert!(body.contains("invalid_grant"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_open_selects_first_sheet() {
    let mock_server = MockServer::start().await;
    let key_file = create_key_file(&mock_server.uri());
    mount_sheet_lookup(&mock_server).await;

    let sheet = open_sheet(&sheets_config(&mock_server.uri(), key_file.path()))
        .await
        .unwrap();

    assert_eq!(sheet.spreadsheet_id(), SPREADSHEET_ID);
    assert_eq!(sheet.sheet_title(), "Sheet1");

    let requests = mock_server.received_requests().await.unwrap();
    let lookup = requests
        .iter()
        .find(|r| r.url.path() == "/drive/v3/files")
        .unwrap();
    let query: String = lookup
        .url
        .query_pairs()
        .find(|(k, _)| k == "q")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    assert!(query.contains("name = 'Weekly Digest'"));
    assert!(query.contains("trashed = false"));
}

#[tokio::test]
async fn test_open_missing_spreadsheet() {
    let mock_server = MockServer::start().await;
    let key_file = create_key_file(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "expires_in": 3599
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"files": []})))
        .mount(&mock_server)
        .await;

    let result = open_sheet(&sheets_config(&mock_server.uri(), key_file.path())).await;
    assert!(matches!(result, Err(SheetError::SpreadsheetNotFound(ref name)) if name == "Weekly Digest"));
}

#[tokio::test]
async fn test_missing_credentials_file() {
    let config = sheets_config(
        "http://127.0.0.1:1",
        std::path::Path::new("/nonexistent/service-account.json"),
    );
    assert!(matches!(open_sheet(&config).await, Err(SheetError::Io(_))));
}

#[tokio::test]
async fn test_publish_clears_then_appends_rows() {
    let mock_server = MockServer::start().await;
    let key_file = create_key_file(&mock_server.uri());
    mount_sheet_lookup(&mock_server).await;
    // Header, campaign, blank, label, item header, two items
    mount_sheet_writes(&mock_server, 7).await;

    let mut sheet = open_sheet(&sheets_config(&mock_server.uri(), key_file.path()))
        .await
        .unwrap();

    let data = ScrapedData::Items(vec![
        ScrapedItem {
            text: "hello".to_string(),
            timestamp: Some("2024-01-01T00:00:00Z".to_string()),
        },
        ScrapedItem {
            text: "world".to_string(),
            timestamp: None,
        },
    ]);

    let rows = publish(&mut sheet, &[campaign()], &data).await.unwrap();
    assert_eq!(rows, 7);

    let requests = mock_server.received_requests().await.unwrap();
    let writes: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path().contains("/values/"))
        .collect();

    assert!(writes[0].url.path().ends_with(":clear"));
    assert!(writes[1..].iter().all(|r| r.url.path().ends_with(":append")));

    let append = writes[1];
    let pairs: Vec<(String, String)> = append
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(pairs.contains(&("valueInputOption".to_string(), "RAW".to_string())));
    assert!(pairs.contains(&("insertDataOption".to_string(), "INSERT_ROWS".to_string())));

    let bodies: Vec<Value> = writes[1..]
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    assert_eq!(
        bodies[0],
        json!({"values": [["Campaign Name", "Status", "Emails Sent", "Open Rate", "Click Rate"]]})
    );
    assert_eq!(bodies[1], json!({"values": [["A", "sent", 100, 0.5, 0.1]]}));
    assert_eq!(bodies[2], json!({"values": [["", "", "", "", ""]]}));
    assert_eq!(bodies[3], json!({"values": [["Scraped Tweet Data"]]}));
    assert_eq!(bodies[4], json!({"values": [["Timestamp", "Tweet Text"]]}));
    assert_eq!(
        bodies[5],
        json!({"values": [["2024-01-01T00:00:00Z", "hello"]]})
    );
    assert_eq!(bodies[6], json!({"values": [["N/A", "world"]]}));
}

#[tokio::test]
async fn test_append_failure_surfaces() {
    let mock_server = MockServer::start().await;
    let key_file = create_key_file(&mock_server.uri());
    mount_sheet_lookup(&mock_server).await;

    Mock::given(method("POST"))
        .and(path_regex(r":clear$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r":append$"))
        .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut sheet = open_sheet(&sheets_config(&mock_server.uri(), key_file.path()))
        .await
        .unwrap();

    let result = sheet
        .append_row(&[Cell::Text("only".to_string())])
        .await;
    assert!(matches!(result, Err(SheetError::Api { status: 403, .. })));
}
