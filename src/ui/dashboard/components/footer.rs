//! Dashboard footer component
//!
//! Renders key bindings and the time of the last recompute

use super::super::state::DashboardState;
use super::super::utils::format_compact_timestamp;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let footer_text = format!(
        "[Tab] Campo | [←/→] Dia | [↑/↓] Semana | [PgUp/PgDn] 30 dias | [D] Padrão | [R] Recarregar | [Q] Sair | {}",
        format_compact_timestamp(&state.last_refresh)
    );

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
