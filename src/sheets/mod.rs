//! Remote spreadsheet access
//!
//! The exporter only needs three things from the service: open a
//! spreadsheet by URL, list its worksheets by index, and read one worksheet
//! as a grid of text.

pub mod auth;
pub mod client;
pub mod error;

pub use client::SheetsClient;
pub use error::SheetsError;

#[cfg(test)]
use mockall::automock;

/// One tab of a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worksheet {
    /// Zero-based position among the tabs.
    pub index: usize,
    pub sheet_id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spreadsheet {
    pub id: String,
    pub title: String,
    pub worksheets: Vec<Worksheet>,
}

impl Spreadsheet {
    pub fn get_worksheet(&self, index: usize) -> Result<&Worksheet, SheetsError> {
        self.worksheets
            .iter()
            .find(|worksheet| worksheet.index == index)
            .ok_or(SheetsError::MissingWorksheet(index))
    }
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SpreadsheetService: Send + Sync {
    /// Opens the spreadsheet the URL points at.
    async fn open_by_url(&self, url: &str) -> Result<Spreadsheet, SheetsError>;

    /// All cell values of a worksheet as a rectangular grid of text.
    async fn get_all_values(
        &self,
        spreadsheet_id: &str,
        worksheet: &Worksheet,
    ) -> Result<Vec<Vec<String>>, SheetsError>;
}

/// Extracts the key from `https://docs.google.com/spreadsheets/d/<key>/...`.
pub fn spreadsheet_id_from_url(url: &str) -> Result<String, SheetsError> {
    let invalid = || SheetsError::InvalidUrl(url.to_string());
    let (_, rest) = url.split_once("/spreadsheets/d/").ok_or_else(invalid)?;
    let id = rest
        .split(['/', '?', '#'])
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(invalid)?;
    Ok(id.to_string())
}

/// Pads every row with empty cells up to the widest row.
pub fn rectangularize(mut grid: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(width, String::new());
    }
    grid
}
