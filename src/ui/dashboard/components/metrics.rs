//! Dashboard metrics components
//!
//! Renders the period heading and one card per dataset

use crate::dashboard::presenter::{Metric, Summary};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render the period summary: heading on top, metric cards below.
pub fn render_summary(f: &mut Frame, area: ratatui::layout::Rect, summary: &Summary) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Period heading
            Constraint::Length(5), // Metric cards
            Constraint::Fill(1),
        ])
        .split(area);

    let heading = Paragraph::new(summary.heading())
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(heading, chunks[0]);

    // Equal-width cards
    let count = summary.metrics.len().max(1) as u32;
    let card_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); summary.metrics.len()])
        .split(chunks[1]);

    for (metric, card_area) in summary.metrics.iter().zip(card_chunks.iter()) {
        render_metric_card(f, *card_area, metric);
    }
}

fn render_metric_card(f: &mut Frame, area: ratatui::layout::Rect, metric: &Metric) {
    let value_color = if metric.count > 0 {
        Color::LightGreen
    } else {
        Color::DarkGray
    };

    let card = Paragraph::new(vec![Line::from(Span::styled(
        metric.count.to_string(),
        Style::default()
            .fg(value_color)
            .add_modifier(Modifier::BOLD),
    ))])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(metric.label)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(card, area);
}
