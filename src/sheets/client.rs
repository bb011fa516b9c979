//! Sheets REST client
//!
//! Read-only access to the Google Sheets v4 API with a bearer token.

use super::auth::TokenSource;
use super::error::SheetsError;
use super::{Spreadsheet, SpreadsheetService, Worksheet, rectangularize, spreadsheet_id_from_url};
use crate::consts::export_consts::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, SHEETS_API_URL};
use log::debug;
use reqwest::{Client, ClientBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("sheets-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    #[serde(rename = "spreadsheetId")]
    spreadsheet_id: String,
    properties: SpreadsheetProperties,
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetProperties {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId", default)]
    sheet_id: i64,
    title: String,
    #[serde(default)]
    index: usize,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

pub struct SheetsClient {
    client: Client,
    tokens: Box<dyn TokenSource>,
    base_url: String,
}

impl SheetsClient {
    pub fn new(tokens: Box<dyn TokenSource>) -> Result<Self, SheetsError> {
        Ok(Self {
            client: ClientBuilder::new()
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            tokens,
            base_url: SHEETS_API_URL.to_string(),
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, SheetsError> {
        if !response.status().is_success() {
            return Err(SheetsError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, SheetsError> {
        let token = self.tokens.access_token().await?;
        let url = self.build_url(endpoint);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// A1 range covering a whole worksheet: its quoted title.
fn sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait::async_trait]
impl SpreadsheetService for SheetsClient {
    async fn open_by_url(&self, url: &str) -> Result<Spreadsheet, SheetsError> {
        let id = spreadsheet_id_from_url(url)?;
        let endpoint = format!(
            "{}?fields={}",
            id,
            urlencoding::encode("spreadsheetId,properties.title,sheets.properties")
        );
        let response: SpreadsheetResponse = self.get_json(&endpoint).await?;

        let mut worksheets: Vec<Worksheet> = response
            .sheets
            .into_iter()
            .map(|sheet| Worksheet {
                index: sheet.properties.index,
                sheet_id: sheet.properties.sheet_id,
                title: sheet.properties.title,
            })
            .collect();
        worksheets.sort_by_key(|worksheet| worksheet.index);

        Ok(Spreadsheet {
            id: response.spreadsheet_id,
            title: response.properties.title,
            worksheets,
        })
    }

    async fn get_all_values(
        &self,
        spreadsheet_id: &str,
        worksheet: &Worksheet,
    ) -> Result<Vec<Vec<String>>, SheetsError> {
        let endpoint = format!(
            "{}/values/{}?majorDimension=ROWS&valueRenderOption=FORMATTED_VALUE",
            spreadsheet_id,
            urlencoding::encode(&sheet_range(&worksheet.title))
        );
        let range: ValueRange = self.get_json(&endpoint).await?;
        let grid = range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();
        Ok(rectangularize(grid))
    }
}
