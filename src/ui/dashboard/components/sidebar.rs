//! Dashboard sidebar component
//!
//! Renders the two date pickers and the validation error, if any

use super::super::state::DashboardState;
use super::super::utils::format_date;
use crate::dashboard::PickerField;
use ratatui::Frame;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// Render the "Filtros" sidebar.
pub fn render_sidebar(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let selection = &state.selection;
    let mut lines = Vec::new();

    for field in [PickerField::Start, PickerField::End] {
        let focused = selection.focus() == field;
        let marker = if focused { "▶ " } else { "  " };
        let value_style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(format!("{}: ", field), Style::default().fg(Color::Gray)),
            Span::styled(format!(" {} ", format_date(selection.value(field))), value_style),
        ]));
        lines.push(Line::from(""));
    }

    let (min, max) = selection.bounds();
    lines.push(Line::from(vec![
        Span::styled("Intervalo: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} - {}", format_date(min), format_date(max)),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    if selection.is_default() {
        lines.push(Line::from(Span::styled(
            "(período completo)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    if let Some(error) = state.pass.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let block = Block::default()
        .title("Filtros")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
