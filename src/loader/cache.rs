//! Cache for loaded snapshot files.

use super::LoadOutcome;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Last outcome per (path, date column). Lives for the process unless
/// explicitly invalidated.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: HashMap<(PathBuf, String), LoadOutcome>,
}

impl LoadCache {
    pub fn get(&self, path: &Path, date_column: &str) -> Option<&LoadOutcome> {
        self.entries
            .get(&(path.to_path_buf(), date_column.to_string()))
    }

    pub fn insert(&mut self, path: &Path, date_column: &str, outcome: LoadOutcome) {
        self.entries
            .insert((path.to_path_buf(), date_column.to_string()), outcome);
    }

    /// Drops every entry for `path`, whatever the date column.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.retain(|(cached, _), _| cached != path);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
