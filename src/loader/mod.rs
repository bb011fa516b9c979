//! Table loader
//!
//! Turns snapshot files into [`Dataset`]s. Every failure is non-fatal: the
//! caller always gets a dataset back (possibly empty) together with the
//! conditions raised while producing it.

mod cache;

pub use cache::LoadCache;

use crate::consts::dashboard_consts::DATE_FORMAT;
use crate::dataset::Dataset;
use crate::dataset::snapshot::read_snapshot;
use crate::logging::LogLevel;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conditions raised while loading a single file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadSignal {
    #[error("Erro: Arquivo não encontrado em {}", .path.display())]
    MissingFile { path: PathBuf },

    #[error("Coluna '{column}' não encontrada em {file}. Datas não serão processadas.")]
    MissingColumn { file: String, column: String },

    #[error("{count} linhas removidas de {file} devido a datas inválidas.")]
    RowsDropped { file: String, count: usize },

    #[error("Erro ao carregar ou processar {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },
}

impl LoadSignal {
    pub fn log_level(&self) -> LogLevel {
        match self {
            LoadSignal::MissingFile { .. } | LoadSignal::Load { .. } => LogLevel::Error,
            LoadSignal::MissingColumn { .. } | LoadSignal::RowsDropped { .. } => LogLevel::Warn,
        }
    }
}

/// A loaded dataset and what happened while loading it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub signals: Vec<LoadSignal>,
}

/// Every configured dataset, keyed by name, plus all raised signals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedData {
    pub datasets: BTreeMap<String, Dataset>,
    pub signals: Vec<LoadSignal>,
}

/// Loads one snapshot and cleans its date column. Never fails.
pub fn load_single_file(path: &Path, date_column: &str) -> LoadOutcome {
    let file = file_label(path);
    let dataset = match read_snapshot(path) {
        Ok(dataset) => dataset,
        Err(e) if e.is_not_found() => {
            return LoadOutcome {
                dataset: Dataset::empty(),
                signals: vec![LoadSignal::MissingFile {
                    path: path.to_path_buf(),
                }],
            };
        }
        Err(e) => {
            return LoadOutcome {
                dataset: Dataset::empty(),
                signals: vec![LoadSignal::Load {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }],
            };
        }
    };

    let Some(index) = dataset.column_index(date_column) else {
        return LoadOutcome {
            dataset,
            signals: vec![LoadSignal::MissingColumn {
                file,
                column: date_column.to_string(),
            }],
        };
    };

    let (dataset, dropped) = dataset
        .map_column(index, |cell| cell.into_date(DATE_FORMAT))
        .drop_nulls(index);
    let mut signals = Vec::new();
    if dropped > 0 {
        signals.push(LoadSignal::RowsDropped {
            file,
            count: dropped,
        });
    }
    LoadOutcome { dataset, signals }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Loader with an explicit per-process cache.
#[derive(Debug, Default)]
pub struct TableLoader {
    cache: LoadCache,
}

impl TableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path`, reusing the cached outcome when there is one.
    pub fn load(&mut self, path: &Path, date_column: &str) -> LoadOutcome {
        if let Some(outcome) = self.cache.get(path, date_column) {
            debug!("Cache hit for {}", path.display());
            return outcome.clone();
        }
        let outcome = load_single_file(path, date_column);
        for signal in &outcome.signals {
            warn!("{}", signal);
        }
        self.cache.insert(path, date_column, outcome.clone());
        outcome
    }

    /// Loads every dataset in `files`.
    pub fn load_all(&mut self, files: &BTreeMap<String, PathBuf>, date_column: &str) -> LoadedData {
        let mut loaded = LoadedData::default();
        for (name, path) in files {
            let outcome = self.load(path, date_column);
            loaded.signals.extend(outcome.signals);
            loaded.datasets.insert(name.clone(), outcome.dataset);
        }
        loaded
    }

    pub fn invalidate(&mut self, path: &Path) {
        self.cache.invalidate(path);
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
