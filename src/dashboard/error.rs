//! Error handling for the dashboard pass

use crate::consts::dashboard_consts::DATE_FORMAT;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// The selected start date comes after the selected end date. Nothing
    /// downstream of the filter is rendered for that pass.
    #[error(
        "Erro: A data de início não pode ser posterior à data de fim ({} > {}).",
        .start.format(DATE_FORMAT),
        .end.format(DATE_FORMAT)
    )]
    RangeValidation { start: NaiveDate, end: NaiveDate },
}
