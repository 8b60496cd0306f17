//! Google Sheets REST client
//!
//! Opens a spreadsheet by name through the Drive file list, selects its first
//! sheet, and exposes clear and append-row on that sheet.

use crate::sheets::auth::AccessToken;
use crate::sheets::layout::Cell;
use crate::sheets::writer::SheetWriter;
use crate::{SheetError, SheetResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use url::Url;

const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// The first sheet of one spreadsheet
#[derive(Debug, Clone)]
pub struct GoogleSheet {
    client: Client,
    token: String,
    sheets_base: Url,
    spreadsheet_id: String,
    sheet_title: String,
}

impl GoogleSheet {
    /// Finds a spreadsheet by exact name and selects its first sheet
    ///
    /// # Returns
    ///
    /// * `Ok(GoogleSheet)` - The spreadsheet exists and has at least one sheet
    /// * `Err(SheetError::SpreadsheetNotFound)` - No spreadsheet has that name
    /// * `Err(SheetError::NoSheets)` - The spreadsheet has no sheets
    pub async fn open_by_name(
        client: Client,
        token: &AccessToken,
        sheets_base: &str,
        drive_base: &str,
        name: &str,
    ) -> SheetResult<Self> {
        let drive_base = Url::parse(drive_base)?;
        let sheets_base = Url::parse(sheets_base)?;
        let bearer = token.token.clone();

        let mut list_url = endpoint(&drive_base, &["drive", "v3", "files"])?;
        list_url
            .query_pairs_mut()
            .append_pair("q", &spreadsheet_query(name))
            .append_pair("fields", "files(id,name)")
            .append_pair("supportsAllDrives", "true")
            .append_pair("includeItemsFromAllDrives", "true");

        let files: FileList = send(client.get(list_url.clone()).bearer_auth(&bearer), &list_url)
            .await?
            .json()
            .await?;
        let spreadsheet_id = files
            .files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| SheetError::SpreadsheetNotFound(name.to_string()))?;

        let mut meta_url = endpoint(&sheets_base, &["v4", "spreadsheets", &spreadsheet_id])?;
        meta_url
            .query_pairs_mut()
            .append_pair("fields", "sheets.properties");

        let metadata: SpreadsheetMetadata =
            send(client.get(meta_url.clone()).bearer_auth(&bearer), &meta_url)
                .await?
                .json()
                .await?;
        let sheet_title = metadata
            .sheets
            .into_iter()
            .next()
            .map(|s| s.properties.title)
            .ok_or_else(|| SheetError::NoSheets(name.to_string()))?;

        tracing::info!(
            "Opened spreadsheet '{}' ({}), sheet '{}'",
            name,
            spreadsheet_id,
            sheet_title
        );

        Ok(Self {
            client,
            token: bearer,
            sheets_base,
            spreadsheet_id,
            sheet_title,
        })
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn sheet_title(&self) -> &str {
        &self.sheet_title
    }

    /// A1 range covering the whole sheet
    fn sheet_range(&self) -> String {
        format!("'{}'", self.sheet_title.replace('\'', "''"))
    }

    fn values_url(&self, action: &str) -> SheetResult<Url> {
        let range = format!("{}:{}", self.sheet_range(), action);
        endpoint(
            &self.sheets_base,
            &["v4", "spreadsheets", &self.spreadsheet_id, "values", &range],
        )
    }
}

#[async_trait]
impl SheetWriter for GoogleSheet {
    async fn clear(&mut self) -> SheetResult<()> {
        let url = self.values_url("clear")?;
        send(
            self.client
                .post(url.clone())
                .bearer_auth(&self.token)
                .json(&serde_json::json!({})),
            &url,
        )
        .await?;
        Ok(())
    }

    async fn append_row(&mut self, row: &[Cell]) -> SheetResult<()> {
        let mut url = self.values_url("append")?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        send(
            self.client
                .post(url.clone())
                .bearer_auth(&self.token)
                .json(&serde_json::json!({ "values": [row] })),
            &url,
        )
        .await?;
        Ok(())
    }
}

/// Drive query matching non-trashed spreadsheets with exactly this name
fn spreadsheet_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escaped, SPREADSHEET_MIME_TYPE
    )
}

/// Appends path segments to a base URL
fn endpoint(base: &Url, segments: &[&str]) -> SheetResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| SheetError::UrlParse(::url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Sends a request and turns non-success statuses into errors
async fn send(request: RequestBuilder, url: &Url) -> SheetResult<Response> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SheetError::Api {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}
