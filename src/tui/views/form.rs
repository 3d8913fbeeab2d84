use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::tui::theme::Theme;

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool, theme: &Theme) -> Paragraph<'a> {
    let style = if focused { theme.selection_style() } else { theme.normal_style() };
    Paragraph::new(format!("{label}: {value}")).style(style)
}

fn checkbox(label: &str, on: bool, focused: bool, theme: &Theme) -> Span<'static> {
    let mark = if on { "x" } else { " " };
    let style = if focused { theme.selection_style() } else { theme.normal_style() };
    Span::styled(format!("[{mark}] {label}"), style)
}

pub fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let theme = Theme::default();
    let block = Block::default().borders(Borders::ALL).title("New entry");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1); 5]).split(inner);
    let fields = [
        ("Title", &app.form.title, Focus::Title),
        ("Login*", &app.form.user, Focus::Login),
        ("URL", &app.form.link, Focus::Url),
        ("Password*", &app.form.secret, Focus::Secret),
    ];
    for (i, (label, value, focus)) in fields.into_iter().enumerate() {
        f.render_widget(field_line(label, value, app.focus == focus, &theme), rows[i]);
    }

    let sel = |focus: Focus| {
        if app.focus == focus { theme.selection_style() } else { theme.normal_style() }
    };
    let generator = Line::from(vec![
        Span::styled(format!("Length: {}", app.length_input), sel(Focus::Length)),
        Span::raw("  "),
        checkbox("A-Z", app.include_uppercase, app.focus == Focus::Uppercase, &theme),
        Span::raw("  "),
        checkbox("0-9", app.include_numbers, app.focus == Focus::Numbers, &theme),
        Span::raw("  "),
        checkbox("!@#", app.include_symbols, app.focus == Focus::Symbols, &theme),
        Span::raw("  "),
        Span::styled("<Generate>", sel(Focus::Generate)),
    ]);
    f.render_widget(Paragraph::new(generator), rows[4]);
}
