//! In-memory tables
//!
//! A [`Dataset`] is an ordered list of column names plus rows aligned to
//! them. Datasets are immutable once built; every transformation returns a
//! new value.

pub mod snapshot;
pub mod value;

pub use value::CellValue;

use chrono::NaiveDateTime;

/// One row, aligned to the owning dataset's columns.
pub type Row = Vec<CellValue>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// A dataset with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A dataset with the given columns and no rows.
    pub fn with_columns(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a dataset, padding or truncating each row to the column count.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Every date held in `column`, skipping nulls and non-date cells.
    pub fn dates(&self, column: &str) -> Vec<NaiveDateTime> {
        match self.column_index(column) {
            Some(index) => self
                .rows
                .iter()
                .filter_map(|row| row[index].as_date())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Same columns, no rows.
    pub fn empty_like(&self) -> Self {
        Self::with_columns(self.columns.clone())
    }

    /// Rows for which `keep` holds, in original order.
    pub fn filter_rows<F>(&self, keep: F) -> Self
    where
        F: Fn(&Row) -> bool,
    {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        }
    }

    /// Rewrites one column cell by cell.
    pub fn map_column<F>(mut self, index: usize, f: F) -> Self
    where
        F: Fn(CellValue) -> CellValue,
    {
        for row in &mut self.rows {
            let cell = std::mem::take(&mut row[index]);
            row[index] = f(cell);
        }
        self
    }

    /// Drops rows whose cell in `index` is null. Returns the number removed.
    pub fn drop_nulls(mut self, index: usize) -> (Self, usize) {
        let before = self.rows.len();
        self.rows.retain(|row| !row[index].is_null());
        let dropped = before - self.rows.len();
        (self, dropped)
    }
}
