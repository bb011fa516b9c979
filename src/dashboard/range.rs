//! Date ranges and the global range across datasets.

use super::error::DashboardError;
use crate::consts::dashboard_consts::DATE_FORMAT;
use crate::dataset::Dataset;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Inclusive calendar-date range; `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if start > end {
            return Err(DashboardError::RangeValidation { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Instants covered by the range: the first instant of `start` through
    /// the last instant of `end`.
    pub fn window(&self) -> (NaiveDateTime, NaiveDateTime) {
        let from = self.start.and_time(NaiveTime::MIN);
        let to = self
            .end
            .checked_add_days(Days::new(1))
            .map(|next| next.and_time(NaiveTime::MIN) - TimeDelta::nanoseconds(1))
            .unwrap_or(NaiveDateTime::MAX);
        (from, to)
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        let (from, to) = self.window();
        instant >= from && instant <= to
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} a {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Span of every date found in `date_column` across all non-empty datasets.
///
/// Falls back to `today` as a single-day range when no dataset has usable
/// dates.
pub fn global_date_range(
    datasets: &BTreeMap<String, Dataset>,
    date_column: &str,
    today: NaiveDate,
) -> DateRange {
    let all_dates: Vec<NaiveDateTime> = datasets
        .values()
        .filter(|dataset| !dataset.is_empty() && dataset.has_column(date_column))
        .flat_map(|dataset| dataset.dates(date_column))
        .collect();

    match (all_dates.iter().min(), all_dates.iter().max()) {
        (Some(min), Some(max)) => DateRange {
            start: min.date(),
            end: max.date(),
        },
        _ => DateRange::single_day(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CellValue;

    fn day(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dated(dates: &[NaiveDate]) -> Dataset {
        Dataset::from_rows(
            vec!["Data".into()],
            dates
                .iter()
                .map(|d| vec![CellValue::Date(d.and_time(NaiveTime::MIN))])
                .collect(),
        )
    }

    #[test]
    fn rejects_start_after_end() {
        let err = DateRange::new(day(2, 1, 2024), day(1, 1, 2024)).unwrap_err();
        assert_eq!(
            err,
            DashboardError::RangeValidation {
                start: day(2, 1, 2024),
                end: day(1, 1, 2024)
            }
        );
    }

    #[test]
    // The window includes the whole end day and nothing of the next one.
    fn window_covers_whole_end_day() {
        let range = DateRange::new(day(10, 1, 2024), day(20, 1, 2024)).unwrap();
        let late = day(20, 1, 2024).and_hms_opt(23, 59, 59).unwrap();
        let next = day(21, 1, 2024).and_time(NaiveTime::MIN);
        assert!(range.contains(late));
        assert!(!range.contains(next));
        assert!(range.contains(day(10, 1, 2024).and_time(NaiveTime::MIN)));
    }

    #[test]
    // Global range spans the minimum and maximum of every dataset.
    fn global_range_spans_all_datasets() {
        let datasets = BTreeMap::from([
            (
                "reunioes".to_string(),
                dated(&[day(5, 3, 2023), day(30, 6, 2023)]),
            ),
            (
                "atendimentos".to_string(),
                dated(&[day(1, 1, 2023), day(15, 5, 2023)]),
            ),
        ]);

        let range = global_date_range(&datasets, "Data", day(1, 1, 2030));

        assert_eq!(range.start(), day(1, 1, 2023));
        assert_eq!(range.end(), day(30, 6, 2023));
        assert_eq!(range.to_string(), "01/01/2023 a 30/06/2023");
    }

    #[test]
    fn time_of_day_is_discarded() {
        let datasets = BTreeMap::from([(
            "reunioes".to_string(),
            Dataset::from_rows(
                vec!["Data".into()],
                vec![vec![CellValue::Date(
                    day(3, 2, 2024).and_hms_opt(18, 30, 0).unwrap(),
                )]],
            ),
        )]);

        let range = global_date_range(&datasets, "Data", day(1, 1, 2030));

        assert_eq!(range, DateRange::single_day(day(3, 2, 2024)));
    }

    #[test]
    // No usable dates anywhere means today as a single-day range.
    fn empty_inputs_fall_back_to_today() {
        let today = day(18, 10, 2026);
        let datasets = BTreeMap::from([
            ("feedbacks".to_string(), Dataset::empty()),
            (
                "mapeamentos".to_string(),
                Dataset::from_rows(vec!["Dia".into()], vec![vec!["01/01/2024".into()]]),
            ),
        ]);

        assert_eq!(
            global_date_range(&datasets, "Data", today),
            DateRange::single_day(today)
        );
        assert_eq!(
            global_date_range(&BTreeMap::new(), "Data", today),
            DateRange::single_day(today)
        );
    }
}
