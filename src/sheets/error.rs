//! Error handling for the spreadsheet service

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetsError {
    /// No authorized session could be obtained.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Not a spreadsheet URL: {0}")]
    InvalidUrl(String),

    #[error("Worksheet index {0} not found")]
    MissingWorksheet(usize),

    /// Failed to decode a JSON payload.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetsError {
    pub async fn from_response(response: reqwest::Response) -> SheetsError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        match status {
            401 | 403 => SheetsError::Auth(format!("HTTP {}: {}", status, message)),
            _ => SheetsError::Http { status, message },
        }
    }
}
