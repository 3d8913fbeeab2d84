pub mod alert;
pub mod form;
pub mod table;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::layout::areas;
use crate::tui::theme::Theme;
use crate::view::table::TableView;

use self::alert::render_alert;
use self::form::render_form;
use self::table::render_table;

const HINTS: &str = "Tab=next  Enter=save  Ctrl-g=generate  m=mask  d=remove  Esc=quit";

/// Whole screen: form, table, footer, and the alert on top when one is pending.
pub fn render(f: &mut Frame, app: &App, table: &TableView, alert: Option<&str>) {
    let theme = Theme::default();
    let areas = areas(f.area());

    f.render_widget(Paragraph::new("PWA Vault").style(theme.title_style()), areas.title);
    render_form(f, app, areas.form);
    render_table(f, app, table, areas.table);

    let footer = app.toast_message().unwrap_or(HINTS);
    f.render_widget(Paragraph::new(footer).style(theme.toast_style()), areas.footer);

    if let Some(message) = alert {
        render_alert(f, message);
    }
}
