//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::consts::dashboard_consts::DATE_FORMAT;
use crate::logging::LogLevel;
use chrono::NaiveDate;
use ratatui::prelude::Color;

/// Get a ratatui color for a notice severity
pub fn get_level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Error => Color::LightRed,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Info => Color::Gray,
        LogLevel::Debug | LogLevel::Trace => Color::DarkGray,
    }
}

/// Format a date the way the pickers show it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format compact timestamp with time only from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract HH:MM:SS from "YYYY-MM-DD HH:MM:SS"
    timestamp
        .split(' ')
        .nth(1)
        .map(str::to_string)
        .unwrap_or_else(|| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact_timestamp() {
        assert_eq!(format_compact_timestamp("2024-01-09 08:15:00"), "08:15:00");
        assert_eq!(format_compact_timestamp("garbled"), "garbled");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        assert_eq!(format_date(date), "09/01/2024");
    }
}
