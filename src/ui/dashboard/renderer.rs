//! Dashboard main renderer

use super::components::{footer, header, metrics, notices, sidebar};
use super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_chunks[1]);

    sidebar::render_sidebar(f, content_chunks[0], state);

    // Notices sit above the summary; they take no room when there are none.
    let notice_height = notices::panel_height(state, content_chunks[1].width);
    let main_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(notice_height), Constraint::Fill(1)])
        .split(content_chunks[1]);

    if notice_height > 0 {
        notices::render_notices(f, main_area[0], state);
    }
    // An invalid selection stops here: no heading, no metrics.
    if let Some(summary) = state.pass.summary() {
        metrics::render_summary(f, main_area[1], summary);
    }

    footer::render_footer(f, main_chunks[2], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::presenter::summarize;
    use crate::dashboard::error::DashboardError;
    use crate::dashboard::range::DateRange;
    use crate::dashboard::{DashboardPass, DateSelection};
    use crate::loader::LoadSignal;
    use chrono::NaiveDate;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn day(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draw(state: &DashboardState) -> String {
        draw_sized(state, 160, 40)
    }

    fn draw_sized(state: &DashboardState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn state_with(outcome: Result<crate::dashboard::presenter::Summary, DashboardError>) -> DashboardState {
        state_with_notices(
            outcome,
            vec![LoadSignal::MissingFile {
                path: PathBuf::from("data/dados-feedbacks.parquet"),
            }],
        )
    }

    fn state_with_notices(
        outcome: Result<crate::dashboard::presenter::Summary, DashboardError>,
        notices: Vec<LoadSignal>,
    ) -> DashboardState {
        let bounds = DateRange::new(day(1, 1, 2024), day(31, 1, 2024)).unwrap();
        let pass = DashboardPass {
            bounds,
            notices,
            outcome,
        };
        DashboardState::new(DateSelection::new(bounds.start(), bounds.end()), pass, false)
    }

    #[test]
    fn renders_heading_and_metric_cards() {
        let range = DateRange::new(day(10, 1, 2024), day(20, 1, 2024)).unwrap();
        let state = state_with(Ok(summarize(&BTreeMap::new(), range)));

        let screen = draw(&state);

        assert!(screen.contains("Resumo do Período: 10/01/2024 a 20/01/2024"));
        for label in ["Reuniões", "Feedbacks", "Atendimentos", "Mapeamentos"] {
            assert!(screen.contains(label), "missing card {label}");
        }
        assert!(screen.contains("Arquivo não encontrado"));
    }

    #[test]
    // A validation error shows in the sidebar and suppresses the summary.
    fn validation_error_hides_summary() {
        let state = state_with(Err(DashboardError::RangeValidation {
            start: day(20, 1, 2024),
            end: day(10, 1, 2024),
        }));

        let screen = draw(&state);

        assert!(screen.contains("Erro: A data de início"));
        assert!(!screen.contains("Resumo do Período"));
        // The header mentions the datasets in the singular; cards use plurals.
        assert!(!screen.contains("Atendimentos"));
        assert!(!screen.contains("Mapeamentos"));
    }

    #[test]
    // A notice wider than the pane wraps and the panel grows to fit it.
    fn long_notices_are_not_cut_off() {
        let range = DateRange::new(day(10, 1, 2024), day(20, 1, 2024)).unwrap();
        let state = state_with_notices(
            Ok(summarize(&BTreeMap::new(), range)),
            vec![LoadSignal::RowsDropped {
                file: "dados-de-um-arquivo-com-um-nome-bem-comprido.parquet".to_string(),
                count: 3,
            }],
        );

        assert_eq!(notices::panel_height(&state, 200), 3);
        assert!(notices::panel_height(&state, 40) > 3);

        let screen = draw_sized(&state, 60, 40);
        assert!(screen.contains("inválidas."));
    }

    #[test]
    fn no_notices_take_no_room() {
        let range = DateRange::new(day(10, 1, 2024), day(20, 1, 2024)).unwrap();
        let state = state_with_notices(Ok(summarize(&BTreeMap::new(), range)), Vec::new());
        assert_eq!(notices::panel_height(&state, 100), 0);
    }
}
