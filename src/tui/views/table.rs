use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use crate::tui::app::{App, Focus};
use crate::tui::layout::{
    actions_cell, password_cell, table_offset, visible_rows, COLUMN_SPACING, COLUMN_WIDTHS,
    TABLE_FLEX,
};
use crate::tui::theme::Theme;
use crate::view::table::{TableView, COLUMN_TITLES, EMPTY_PLACEHOLDER};

pub fn render_table(f: &mut Frame, app: &App, table: &TableView, area: Rect) {
    let theme = Theme::default();

    let header = Row::new(COLUMN_TITLES.map(Cell::from))
        .style(theme.title_style())
        .bottom_margin(1);

    let rows: Vec<Row> = match table {
        TableView::Placeholder => {
            vec![Row::new([Cell::from(EMPTY_PLACEHOLDER)]).style(theme.muted_style())]
        }
        TableView::Rows(rows) => rows
            .iter()
            .map(|r| {
                let secret_style = if r.masked { theme.muted_style() } else { theme.secret_style() };
                Row::new([
                    Cell::from(r.title.clone()),
                    Cell::from(r.user.clone()),
                    Cell::from(r.link_text().to_string()),
                    Cell::from(password_cell(r)).style(secret_style),
                    Cell::from(actions_cell()).style(theme.toast_style()),
                ])
            })
            .collect(),
    };

    let title = format!("Entries ({})", table.rows().len());
    let border_style = if app.focus == Focus::Table {
        theme.selection_style()
    } else {
        theme.normal_style()
    };
    let widget = Table::new(rows, COLUMN_WIDTHS)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .flex(TABLE_FLEX)
        .row_highlight_style(theme.row_highlight_style())
        .block(Block::default().borders(Borders::ALL).border_style(border_style).title(title));

    let mut state = TableState::default().with_offset(table_offset(app.selected, visible_rows(area)));
    if app.focus == Focus::Table && !table.rows().is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(widget, area, &mut state);
}
