//! Dashboard state management
//!
//! Contains the view state rendered on every frame

use crate::dashboard::{DashboardPass, DateSelection};
use chrono::Local;

/// What the renderer needs: the pickers and the latest pass.
#[derive(Debug)]
pub struct DashboardState {
    /// Date pickers, kept across passes.
    pub selection: DateSelection,
    /// Result of the most recent recompute.
    pub pass: DashboardPass,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// When the last pass ran, "YYYY-MM-DD HH:MM:SS".
    pub last_refresh: String,
}

impl DashboardState {
    pub fn new(selection: DateSelection, pass: DashboardPass, with_background_color: bool) -> Self {
        Self {
            selection,
            pass,
            with_background_color,
            last_refresh: now_timestamp(),
        }
    }

    /// Replace the pass after a recompute.
    pub fn set_pass(&mut self, pass: DashboardPass) {
        self.pass = pass;
        self.last_refresh = now_timestamp();
    }
}

fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
