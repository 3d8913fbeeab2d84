use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::theme::Theme;

/// Blocking alert popup; any key dismisses it.
pub fn render_alert(f: &mut Frame, message: &str) {
    let theme = Theme::default();
    let area = centered(f.area(), 50, 5);
    f.render_widget(Clear, area);
    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("Press any key", theme.muted_style())),
    ];
    let popup = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Alert").border_style(theme.toast_style()));
    f.render_widget(popup, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(row);
    cell
}
