//! One full dashboard recompute.

use super::error::DashboardError;
use super::filter::filter_by_date;
use super::presenter::{Summary, summarize};
use super::range::{DateRange, global_date_range};
use super::selection::DateSelection;
use crate::config::DashboardConfig;
use crate::loader::{LoadSignal, TableLoader};
use chrono::NaiveDate;

/// Everything the view needs from one pass.
///
/// `outcome` is `Err` when the selection is invalid; in that case no
/// summary exists and nothing below the filter is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPass {
    pub bounds: DateRange,
    pub notices: Vec<LoadSignal>,
    pub outcome: Result<Summary, DashboardError>,
}

impl DashboardPass {
    pub fn summary(&self) -> Option<&Summary> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&DashboardError> {
        self.outcome.as_ref().err()
    }
}

/// Load → global range → selection → filter → summary.
///
/// The selection's bounds are refreshed from the data before it is
/// validated, so a default selection always tracks the data.
pub fn run_pass(
    loader: &mut TableLoader,
    config: &DashboardConfig,
    selection: &mut DateSelection,
    today: NaiveDate,
) -> DashboardPass {
    let loaded = loader.load_all(&config.files, &config.date_column);
    let bounds = global_date_range(&loaded.datasets, &config.date_column, today);
    selection.set_bounds(bounds.start(), bounds.end());

    let outcome = selection.validate().map(|range| {
        let filtered = filter_by_date(&loaded.datasets, &range, &config.date_column);
        summarize(&filtered, range)
    });

    DashboardPass {
        bounds,
        notices: loaded.signals,
        outcome,
    }
}
