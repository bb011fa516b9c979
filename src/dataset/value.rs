//! Cell values
//!
//! Schema-less tables hold one of four variants per cell. Only the
//! designated date column is ever coerced into [`CellValue::Date`] from text.

use crate::consts::dashboard_consts::DATE_FORMAT;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    /// Text form used when writing snapshots; nulls stay absent.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Coerces a cell of the date column.
    ///
    /// Native dates pass through, text is parsed with `format`, everything
    /// else (including unparseable text) becomes null. Text must look like
    /// `D/M/YYYY`; chrono alone would read `06/03/24` as the year 24.
    pub fn into_date(self, format: &str) -> CellValue {
        match self {
            CellValue::Date(value) => CellValue::Date(value),
            CellValue::Text(text) if has_date_shape(text.trim()) => {
                NaiveDate::parse_from_str(text.trim(), format)
                    .map(|date| CellValue::Date(date.and_time(NaiveTime::MIN)))
                    .unwrap_or(CellValue::Null)
            }
            CellValue::Text(_) => CellValue::Null,
            CellValue::Number(_) | CellValue::Null => CellValue::Null,
        }
    }
}

/// Day and month of one or two digits, a four-digit year.
fn has_date_shape(text: &str) -> bool {
    let parts: Vec<&str> = text.split('/').collect();
    let digits = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    matches!(parts.as_slice(), [day, month, year]
        if digits(day, 1, 2) && digits(month, 1, 2) && digits(year, 4, 4))
}

impl Display for CellValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Number(number) => write!(f, "{}", number),
            CellValue::Date(value) if value.time() == NaiveTime::MIN => {
                write!(f, "{}", value.format(DATE_FORMAT))
            }
            CellValue::Date(value) => write!(f, "{}", value.format("%d/%m/%Y %H:%M:%S")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        CellValue::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn parses_day_month_year_text() {
        let value = CellValue::from("05/03/2023").into_date(DATE_FORMAT);
        assert_eq!(value, CellValue::Date(midnight(2023, 3, 5)));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let value = CellValue::from(" 31/12/2024 ").into_date(DATE_FORMAT);
        assert_eq!(value, CellValue::Date(midnight(2024, 12, 31)));
    }

    #[test]
    fn unparseable_values_become_null() {
        assert!(CellValue::from("2024-01-05").into_date(DATE_FORMAT).is_null());
        assert!(CellValue::from("31/02/2024").into_date(DATE_FORMAT).is_null());
        assert!(CellValue::from("").into_date(DATE_FORMAT).is_null());
        assert!(CellValue::from("06/03/24").into_date(DATE_FORMAT).is_null());
        assert!(CellValue::from("01/01/024").into_date(DATE_FORMAT).is_null());
        assert!(CellValue::from("01/01/+2024").into_date(DATE_FORMAT).is_null());
        assert!(CellValue::Number(45000.0).into_date(DATE_FORMAT).is_null());
    }

    #[test]
    fn single_digit_day_and_month_are_accepted() {
        let value = CellValue::from("5/3/2024").into_date(DATE_FORMAT);
        assert_eq!(value, CellValue::Date(midnight(2024, 3, 5)));
    }

    #[test]
    fn native_dates_pass_through() {
        let value = CellValue::Date(midnight(2024, 1, 1));
        assert_eq!(value.clone().into_date(DATE_FORMAT), value);
    }

    #[test]
    fn display_uses_day_month_year() {
        assert_eq!(CellValue::Date(midnight(2024, 1, 9)).to_string(), "09/01/2024");
        assert_eq!(CellValue::Null.as_text(), None);
        assert_eq!(CellValue::Number(3.5).as_text().as_deref(), Some("3.5"));
    }
}
