//! Application configuration.
//!
//! A single JSON document with one section per pipeline. Every field has a
//! default, so a missing file or a partial document is always usable.

use crate::consts::dashboard_consts::{DASHBOARD_DATASETS, DEFAULT_DATA_DIR, DEFAULT_DATE_COLUMN};
use crate::consts::export_consts::{DEFAULT_SHEET_URL, DEFAULT_TABS, SNAPSHOT_EXTENSION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::fs;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub dashboard: DashboardConfig,
    pub export: ExportConfig,
}

/// Dataset name → snapshot path, plus the designated date column.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardConfig {
    pub files: BTreeMap<String, PathBuf>,
    pub date_column: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let files = DASHBOARD_DATASETS
            .iter()
            .map(|name| {
                let path = Path::new(DEFAULT_DATA_DIR)
                    .join(format!("dados-{}.{}", name, SNAPSHOT_EXTENSION));
                (name.to_string(), path)
            })
            .collect();
        Self {
            files,
            date_column: DEFAULT_DATE_COLUMN.to_string(),
        }
    }
}

/// One worksheet to export: zero-based tab index and output name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TabSpec {
    pub index: usize,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    pub sheet_url: String,
    pub tabs: Vec<TabSpec>,
    pub output_dir: PathBuf,
    /// OAuth client secrets (installed application).
    pub credentials_path: Option<PathBuf>,
    /// Cached authorized user (refresh token).
    pub token_cache_path: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_url: DEFAULT_SHEET_URL.to_string(),
            tabs: DEFAULT_TABS
                .iter()
                .map(|(index, name)| TabSpec {
                    index: *index,
                    name: name.to_string(),
                })
                .collect(),
            output_dir: PathBuf::from("."),
            credentials_path: None,
            token_cache_path: None,
        }
    }
}

impl ExportConfig {
    /// Client secrets location, falling back to `~/.config/gspread/credentials.json`.
    pub fn credentials_path(&self) -> Option<PathBuf> {
        self.credentials_path
            .clone()
            .or_else(|| gspread_dir().map(|dir| dir.join("credentials.json")))
    }

    /// Token cache location, falling back to `~/.config/gspread/authorized_user.json`.
    pub fn token_cache_path(&self) -> Option<PathBuf> {
        self.token_cache_path
            .clone()
            .or_else(|| gspread_dir().map(|dir| dir.join("authorized_user.json")))
    }
}

fn gspread_dir() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".config").join("gspread"))
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the given file, or the defaults when no path is supplied.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, std::io::Error> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}
