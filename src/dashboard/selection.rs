//! Date picker state
//!
//! Holds the user's (start, end) choice between passes. Both pickers are
//! confined to the current bounds, but they are independent of each other:
//! start may be moved past end, which is what [`DateSelection::validate`]
//! catches.

use super::error::DashboardError;
use super::range::DateRange;
use chrono::{Days, NaiveDate};

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum PickerField {
    #[strum(to_string = "Data Início")]
    Start,
    #[strum(to_string = "Data Fim")]
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSelection {
    min: NaiveDate,
    max: NaiveDate,
    /// Explicit user choice; `None` means "use the bounds".
    chosen: Option<(NaiveDate, NaiveDate)>,
    focus: PickerField,
}

impl DateSelection {
    pub fn new(min: NaiveDate, max: NaiveDate) -> Self {
        let mut selection = Self {
            min,
            max,
            chosen: None,
            focus: PickerField::Start,
        };
        selection.set_bounds(min, max);
        selection
    }

    /// Replaces the bounds, clamping any existing choice into them.
    ///
    /// A degenerate `min > max` is corrected by raising `max` to `min`.
    pub fn set_bounds(&mut self, min: NaiveDate, max: NaiveDate) {
        self.min = min;
        self.max = if min > max { min } else { max };
        if let Some((start, end)) = self.chosen {
            self.chosen = Some((self.clamp(start), self.clamp(end)));
        }
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.min, self.max)
    }

    pub fn start(&self) -> NaiveDate {
        self.chosen.map(|(start, _)| start).unwrap_or(self.min)
    }

    pub fn end(&self) -> NaiveDate {
        self.chosen.map(|(_, end)| end).unwrap_or(self.max)
    }

    pub fn value(&self, field: PickerField) -> NaiveDate {
        match field {
            PickerField::Start => self.start(),
            PickerField::End => self.end(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.chosen.is_none()
    }

    /// Sets both pickers, each clamped into the bounds.
    pub fn select(&mut self, start: NaiveDate, end: NaiveDate) {
        self.chosen = Some((self.clamp(start), self.clamp(end)));
    }

    pub fn set(&mut self, field: PickerField, value: NaiveDate) {
        match field {
            PickerField::Start => self.select(value, self.end()),
            PickerField::End => self.select(self.start(), value),
        }
    }

    pub fn focus(&self) -> PickerField {
        self.focus
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PickerField::Start => PickerField::End,
            PickerField::End => PickerField::Start,
        };
    }

    /// Moves the focused picker by `days` (negative moves back).
    pub fn shift(&mut self, days: i64) {
        let current = self.value(self.focus);
        let moved = if days >= 0 {
            current.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            current.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        self.set(self.focus, moved.unwrap_or(current));
    }

    pub fn jump_to_min(&mut self) {
        self.set(self.focus, self.min);
    }

    pub fn jump_to_max(&mut self) {
        self.set(self.focus, self.max);
    }

    /// Back to the full bounds.
    pub fn reset(&mut self) {
        self.chosen = None;
    }

    pub fn validate(&self) -> Result<DateRange, DashboardError> {
        DateRange::new(self.start(), self.end())
    }

    fn clamp(&self, value: NaiveDate) -> NaiveDate {
        value.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_to_bounds() {
        let selection = DateSelection::new(day(1, 1, 2024), day(31, 1, 2024));
        assert!(selection.is_default());
        assert_eq!(
            selection.validate().unwrap(),
            DateRange::new(day(1, 1, 2024), day(31, 1, 2024)).unwrap()
        );
    }

    #[test]
    // min > max is corrected before anything is presented.
    fn degenerate_bounds_are_clamped() {
        let selection = DateSelection::new(day(10, 1, 2024), day(5, 1, 2024));
        assert_eq!(selection.bounds(), (day(10, 1, 2024), day(10, 1, 2024)));
        assert!(selection.validate().is_ok());
    }

    #[test]
    fn pickers_stay_within_bounds() {
        let mut selection = DateSelection::new(day(1, 1, 2024), day(31, 1, 2024));
        selection.shift(-5);
        assert_eq!(selection.start(), day(1, 1, 2024));
        selection.toggle_focus();
        selection.shift(30);
        assert_eq!(selection.end(), day(31, 1, 2024));
        selection.select(day(1, 12, 2023), day(1, 3, 2024));
        assert_eq!(selection.start(), day(1, 1, 2024));
        assert_eq!(selection.end(), day(31, 1, 2024));
    }

    #[test]
    // Moving start past end produces a validation error, not a clamp.
    fn start_after_end_fails_validation() {
        let mut selection = DateSelection::new(day(1, 1, 2024), day(31, 1, 2024));
        selection.select(day(20, 1, 2024), day(10, 1, 2024));
        assert_eq!(
            selection.validate().unwrap_err(),
            DashboardError::RangeValidation {
                start: day(20, 1, 2024),
                end: day(10, 1, 2024)
            }
        );
    }

    #[test]
    fn new_bounds_keep_choice_when_possible() {
        let mut selection = DateSelection::new(day(1, 1, 2024), day(31, 1, 2024));
        selection.select(day(10, 1, 2024), day(20, 1, 2024));
        selection.set_bounds(day(15, 1, 2024), day(31, 3, 2024));
        assert_eq!(selection.start(), day(15, 1, 2024));
        assert_eq!(selection.end(), day(20, 1, 2024));

        selection.reset();
        assert_eq!(selection.end(), day(31, 3, 2024));
    }

    #[test]
    fn jumps_move_focused_picker_only() {
        let mut selection = DateSelection::new(day(1, 1, 2024), day(31, 1, 2024));
        selection.select(day(10, 1, 2024), day(20, 1, 2024));
        selection.toggle_focus();
        assert_eq!(selection.focus(), PickerField::End);
        selection.jump_to_max();
        assert_eq!(selection.start(), day(10, 1, 2024));
        assert_eq!(selection.end(), day(31, 1, 2024));
        assert_eq!(PickerField::End.to_string(), "Data Fim");
    }
}
