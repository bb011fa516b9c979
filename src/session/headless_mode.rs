//! Headless mode execution

use super::messages::{print_session_exit_success, print_session_starting};
use crate::config::DashboardConfig;
use crate::dashboard::error::DashboardError;
use crate::dashboard::presenter::Summary;
use crate::dashboard::{DateSelection, run_pass};
use crate::loader::TableLoader;
use crate::logging::LogLevel;
use crate::{print_cmd_error, print_cmd_warn};
use chrono::{Local, NaiveDate};

/// Runs one dashboard pass and prints it
///
/// `start`/`end` override the default selection; like the interactive
/// pickers they are clamped into the global bounds.
///
/// # Returns
/// * `Ok(())` - Summary printed
/// * `Err` - The selection was invalid; the error has already been printed
pub fn run_headless_mode(
    config: &DashboardConfig,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), DashboardError> {
    print_session_starting("headless", config.files.len());

    let today = Local::now().date_naive();
    let mut loader = TableLoader::new();
    let mut selection = DateSelection::new(today, today);
    let mut pass = run_pass(&mut loader, config, &mut selection, today);

    // Bounds are only known after the first pass; the second one is served
    // from the loader cache.
    if start.is_some() || end.is_some() {
        selection.select(
            start.unwrap_or(selection.start()),
            end.unwrap_or(selection.end()),
        );
        pass = run_pass(&mut loader, config, &mut selection, today);
    }

    for notice in &pass.notices {
        match notice.log_level() {
            LogLevel::Error => print_cmd_error!(&notice.to_string()),
            _ => print_cmd_warn!("Aviso", "{}", notice),
        }
    }

    match pass.outcome {
        Ok(summary) => {
            print!("{}", format_summary(&summary));
            print_session_exit_success();
            Ok(())
        }
        Err(e) => {
            print_cmd_error!(&e.to_string());
            Err(e)
        }
    }
}

/// Plain-text rendition of the summary: heading, then one line per metric.
pub fn format_summary(summary: &Summary) -> String {
    let mut out = format!("{}\n", summary.heading());
    for metric in &summary.metrics {
        out.push_str(&format!("  {}: {}\n", metric.label, metric.count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::range::DateRange;
    use crate::dashboard::presenter::summarize;
    use crate::dataset::Dataset;
    use std::collections::BTreeMap;

    #[test]
    fn summary_lists_every_metric() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
        )
        .unwrap();
        let filtered = BTreeMap::from([(
            "reunioes".to_string(),
            Dataset::from_rows(vec!["Data".into()], vec![vec![]; 11]),
        )]);

        let text = format_summary(&summarize(&filtered, range));

        assert_eq!(
            text,
            "Resumo do Período: 10/01/2024 a 20/01/2024\n  Reuniões: 11\n  Feedbacks: 0\n  Atendimentos: 0\n  Mapeamentos: 0\n"
        );
    }
}
