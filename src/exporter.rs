//! Spreadsheet export
//!
//! Pulls each configured worksheet and stores it as a text-only snapshot
//! named after the tab. A failing tab is logged and skipped; the batch
//! always runs to the end.

use crate::config::TabSpec;
use crate::consts::export_consts::SNAPSHOT_EXTENSION;
use crate::dataset::snapshot::{SnapshotError, write_snapshot};
use crate::dataset::{CellValue, Dataset};
use crate::sheets::{SheetsError, SpreadsheetService};
use crate::{print_cmd_error, print_cmd_info, print_cmd_success};
use log::{error, info};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportTabError {
    #[error(transparent)]
    Sheets(#[from] SheetsError),

    #[error("Failed to write snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Worksheet has no header row")]
    EmptySheet,

    #[error("Header cell in column {column} is blank")]
    BlankHeader { column: usize },

    #[error("Header '{name}' appears more than once")]
    DuplicateHeader { name: String },
}

/// A written snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTab {
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug)]
pub struct TabOutcome {
    pub tab: TabSpec,
    pub result: Result<ExportedTab, ExportTabError>,
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub outcomes: Vec<TabOutcome>,
}

impl ExportReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// One line per failed tab, in batch order.
    pub fn failure_lines(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|outcome| {
                outcome.result.as_ref().err().map(|e| {
                    format!(
                        "Tab {} ({}) not exported: {}",
                        outcome.tab.index, outcome.tab.name, e
                    )
                })
            })
            .collect()
    }

    /// True when there was something to export and none of it worked.
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.succeeded() == 0
    }
}

/// Row 0 becomes the header, the rest become text rows.
///
/// Header cells are kept exactly as written. Whitespace-only or repeated
/// header cells are rejected rather than renamed.
pub fn table_from_grid(grid: Vec<Vec<String>>) -> Result<Dataset, ExportTabError> {
    let mut rows = grid.into_iter();
    let header = rows.next().ok_or(ExportTabError::EmptySheet)?;
    if header.is_empty() {
        return Err(ExportTabError::EmptySheet);
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(header.len());
    for (column, name) in header.into_iter().enumerate() {
        if name.trim().is_empty() {
            return Err(ExportTabError::BlankHeader { column });
        }
        if !seen.insert(name.clone()) {
            return Err(ExportTabError::DuplicateHeader { name });
        }
        columns.push(name);
    }

    let rows = rows
        .map(|row| row.into_iter().map(CellValue::Text).collect())
        .collect();
    Ok(Dataset::from_rows(columns, rows))
}

/// Snapshot location for a tab.
pub fn snapshot_path(output_dir: &Path, tab: &TabSpec) -> PathBuf {
    output_dir.join(format!("{}.{}", tab.name, SNAPSHOT_EXTENSION))
}

/// Exports a single worksheet.
pub async fn export_tab(
    service: &dyn SpreadsheetService,
    url: &str,
    tab: &TabSpec,
    output_dir: &Path,
) -> Result<ExportedTab, ExportTabError> {
    let spreadsheet = service.open_by_url(url).await?;
    let worksheet = spreadsheet.get_worksheet(tab.index)?;
    let grid = service.get_all_values(&spreadsheet.id, worksheet).await?;
    let table = table_from_grid(grid)?;

    let path = snapshot_path(output_dir, tab);
    write_snapshot(&path, &table)?;
    Ok(ExportedTab {
        path,
        rows: table.len(),
    })
}

/// Exports every tab in order and prints a per-tab summary.
pub async fn export_all(
    service: &dyn SpreadsheetService,
    url: &str,
    tabs: &[TabSpec],
    output_dir: &Path,
) -> ExportReport {
    let mut report = ExportReport::default();
    for tab in tabs {
        info!("Exporting tab {} ({})", tab.index, tab.name);
        let result = export_tab(service, url, tab, output_dir).await;
        match &result {
            Ok(exported) => {
                info!(
                    "Tab {} saved to {} ({} rows)",
                    tab.index,
                    exported.path.display(),
                    exported.rows
                );
                print_cmd_success!(
                    &tab.name,
                    "{} rows -> {}",
                    exported.rows,
                    exported.path.display()
                );
            }
            Err(e) => {
                error!("Tab {} ({}) failed: {}", tab.index, tab.name, e);
                print_cmd_error!(&tab.name, e.to_string().as_str());
            }
        }
        report.outcomes.push(TabOutcome {
            tab: tab.clone(),
            result,
        });
    }

    print_cmd_info!(
        "Export finished",
        "{} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    for line in report.failure_lines() {
        print_cmd_error!(&line);
    }
    report
}
