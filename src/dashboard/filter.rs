//! Date filter
//!
//! Pure functions: inputs are never modified and a new map is always
//! returned.

use super::range::DateRange;
use crate::dataset::Dataset;
use std::collections::BTreeMap;

/// Rows of `dataset` whose date falls inside `range`.
///
/// Empty datasets and datasets without the date column become an empty
/// dataset with the same columns.
pub fn filter_dataset(dataset: &Dataset, range: &DateRange, date_column: &str) -> Dataset {
    match dataset.column_index(date_column) {
        Some(index) if !dataset.is_empty() => dataset.filter_rows(|row| {
            row[index]
                .as_date()
                .is_some_and(|date| range.contains(date))
        }),
        _ => dataset.empty_like(),
    }
}

/// Applies [`filter_dataset`] to every dataset independently.
pub fn filter_by_date(
    datasets: &BTreeMap<String, Dataset>,
    range: &DateRange,
    date_column: &str,
) -> BTreeMap<String, Dataset> {
    datasets
        .iter()
        .map(|(name, dataset)| (name.clone(), filter_dataset(dataset, range, date_column)))
        .collect()
}
