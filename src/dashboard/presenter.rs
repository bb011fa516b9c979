//! Summary metrics for the selected period.

use super::range::DateRange;
use crate::consts::dashboard_consts::METRIC_LABELS;
use crate::dataset::Dataset;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub key: &'static str,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub range: DateRange,
    pub metrics: Vec<Metric>,
}

impl Summary {
    pub fn heading(&self) -> String {
        format!("Resumo do Período: {}", self.range)
    }

    #[cfg(test)]
    pub fn count(&self, key: &str) -> Option<usize> {
        self.metrics
            .iter()
            .find(|metric| metric.key == key)
            .map(|metric| metric.count)
    }
}

/// One row-count metric per expected dataset. Absent or empty datasets
/// count as zero.
pub fn summarize(filtered: &BTreeMap<String, Dataset>, range: DateRange) -> Summary {
    let metrics = METRIC_LABELS
        .iter()
        .map(|&(key, label)| Metric {
            key,
            label,
            count: filtered.get(key).map(Dataset::len).unwrap_or(0),
        })
        .collect();
    Summary { range, metrics }
}
