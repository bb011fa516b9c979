//! Main application state and UI loop
//!
//! Contains the App struct and the key handling that drives one pass per
//! interaction

use crate::config::DashboardConfig;
use crate::consts::dashboard_consts::picker;
use crate::dashboard::{DateSelection, run_pass};
use crate::loader::TableLoader;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode};
use log::debug;
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;

/// Application state
#[derive(Debug)]
pub struct App {
    /// Dataset table and date column.
    config: DashboardConfig,

    /// Loader with its per-process cache.
    loader: TableLoader,

    /// What gets drawn.
    state: DashboardState,
}

impl App {
    /// Creates the application and runs the first pass.
    pub fn new(config: DashboardConfig, with_background_color: bool) -> Self {
        let today = Local::now().date_naive();
        Self::with_today(config, with_background_color, today)
    }

    fn with_today(config: DashboardConfig, with_background_color: bool, today: NaiveDate) -> Self {
        let mut loader = TableLoader::new();
        let mut selection = DateSelection::new(today, today);
        let pass = run_pass(&mut loader, &config, &mut selection, today);
        Self {
            config,
            loader,
            state: DashboardState::new(selection, pass, with_background_color),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Recomputes everything from the (possibly cached) files.
    fn refresh(&mut self) {
        let today = Local::now().date_naive();
        let pass = run_pass(
            &mut self.loader,
            &self.config,
            &mut self.state.selection,
            today,
        );
        self.state.set_pass(pass);
    }

    /// Forgets every configured file so the next pass re-reads it.
    fn reload(&mut self) {
        for path in self.config.files.values() {
            self.loader.invalidate(path);
        }
        debug!("Reloading, {} tables still cached", self.loader.cached_entries());
    }

    /// Applies one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let selection = &mut self.state.selection;
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Tab | KeyCode::BackTab => selection.toggle_focus(),
            KeyCode::Left => selection.shift(-picker::DAY),
            KeyCode::Right => selection.shift(picker::DAY),
            KeyCode::Down => selection.shift(-picker::WEEK),
            KeyCode::Up => selection.shift(picker::WEEK),
            KeyCode::PageDown => selection.shift(-picker::PAGE),
            KeyCode::PageUp => selection.shift(picker::PAGE),
            KeyCode::Home => selection.jump_to_min(),
            KeyCode::End => selection.jump_to_max(),
            KeyCode::Char('d') => selection.reset(),
            KeyCode::Char('r') => self.reload(),
            _ => return false,
        }
        self.refresh();
        false
    }
}

/// Runs the application UI in a loop, handling events and rendering the dashboard.
pub fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        terminal.draw(|f| render_dashboard(f, &app.state))?;

        // Poll for key events
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                if app.handle_key(key.code) {
                    return Ok(());
                }
            }
        }
    }
}
