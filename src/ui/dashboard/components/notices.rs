//! Dashboard notices component
//!
//! Renders loader warnings and errors above the summary

use super::super::state::DashboardState;
use super::super::utils::get_level_color;
use crate::consts::dashboard_consts::MAX_NOTICES;
use crate::logging::{LogLevel, should_log_with_env};
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

/// Number of notices worth rendering for this pass.
pub fn visible_notice_count(state: &DashboardState) -> usize {
    state
        .pass
        .notices
        .iter()
        .filter(|notice| should_log_with_env(notice.log_level()))
        .take(MAX_NOTICES)
        .count()
}

/// Rows the panel needs at `width`, borders included; 0 when empty.
///
/// Notices wrap, so a long path takes more than one row.
pub fn panel_height(state: &DashboardState, width: u16) -> u16 {
    if visible_notice_count(state) == 0 {
        return 0;
    }
    let inner_width = width.saturating_sub(2);
    let rows = notice_paragraph(state).line_count(inner_width);
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
}

fn notice_paragraph(state: &DashboardState) -> Paragraph<'static> {
    let lines: Vec<Line> = state
        .pass
        .notices
        .iter()
        .filter(|notice| should_log_with_env(notice.log_level()))
        .take(MAX_NOTICES)
        .map(|notice| {
            let level = notice.log_level();
            let icon = match level {
                LogLevel::Error => "❌",
                _ => "⚠",
            };
            Line::from(vec![
                Span::raw(format!("{} ", icon)),
                Span::styled(notice.to_string(), Style::default().fg(get_level_color(level))),
            ])
        })
        .collect();
    Paragraph::new(lines).wrap(Wrap { trim: true })
}

/// Render notices panel.
pub fn render_notices(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .title("AVISOS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Yellow));

    f.render_widget(notice_paragraph(state).block(block), area);
}
