//! Screen geometry shared by drawing and mouse hit-testing.

use ratatui::layout::{Constraint, Flex, Layout, Margin, Position, Rect};
use unicode_width::UnicodeWidthStr;

use crate::view::table::{RowView, TableView, REMOVE_LABEL};
use crate::view::target::{Element, ElementKind};

pub const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Percentage(20), // Title
    Constraint::Percentage(25), // Login
    Constraint::Percentage(20), // URL
    Constraint::Min(14),        // Password
    Constraint::Length(8),      // Actions
];
pub const COLUMN_SPACING: u16 = 1;
pub const TABLE_FLEX: Flex = Flex::Legacy;

/// Header line plus its bottom margin.
const HEADER_ROWS: u16 = 2;

pub struct Areas {
    pub title: Rect,
    pub form: Rect,
    pub table: Rect,
    pub footer: Rect,
}

pub fn areas(area: Rect) -> Areas {
    let [title, form, table, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7), // 4 inputs + generator line + borders
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .areas(area);
    Areas { title, form, table, footer }
}

pub fn password_cell(row: &RowView) -> String {
    format!("{} [{}]", row.secret, row.mask.label)
}

pub fn actions_cell() -> String {
    format!("[{REMOVE_LABEL}]")
}

pub fn visible_rows(table_area: Rect) -> usize {
    table_area.height.saturating_sub(2 + HEADER_ROWS) as usize
}

/// First drawn row such that `selected` stays on screen.
pub fn table_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    (selected + 1).saturating_sub(visible)
}

/// Column rectangles inside the table border, one line high.
pub fn column_rects(table_area: Rect) -> Vec<Rect> {
    let inner = table_area.inner(Margin::new(1, 1));
    Layout::horizontal(COLUMN_WIDTHS)
        .flex(TABLE_FLEX)
        .spacing(COLUMN_SPACING)
        .split(Rect::new(inner.x, inner.y, inner.width, 1))
        .to_vec()
}

/// Element path under a terminal cell, innermost first, ending at the
/// table. Empty when the point is outside the table.
pub fn hit_test(
    table_area: Rect,
    table: &TableView,
    offset: usize,
    column: u16,
    row: u16,
) -> Vec<Element> {
    if !table_area.contains(Position::new(column, row)) {
        return Vec::new();
    }
    let mut outer = vec![Element::plain(ElementKind::Table)];
    let inner = table_area.inner(Margin::new(1, 1));
    let first = inner.y + HEADER_ROWS;
    if row < first || row >= inner.bottom() || column < inner.x || column >= inner.right() {
        return innermost_first(outer);
    }
    let index = (row - first) as usize + offset;

    let rows = match table {
        TableView::Placeholder => {
            if index == 0 {
                outer.push(Element::plain(ElementKind::Row));
                outer.push(Element::plain(ElementKind::Cell));
            }
            return innermost_first(outer);
        }
        TableView::Rows(rows) => rows,
    };
    let Some(view) = rows.get(index) else {
        return innermost_first(outer);
    };
    outer.push(Element::plain(ElementKind::Row));

    let columns = column_rects(table_area);
    let Some((col, rect)) = columns
        .iter()
        .enumerate()
        .find(|(_, r)| column >= r.x && column < r.right())
    else {
        // spacing between columns
        return innermost_first(outer);
    };
    outer.push(Element::plain(ElementKind::Cell));

    let dx = (column - rect.x) as usize;
    match col {
        3 => {
            // offsets are display cells, as drawn
            let start = view.secret.width() + 1;
            let end = start + view.mask.label.width() + 2;
            if (start..end).contains(&dx) {
                outer.push(Element::button(view.mask.clone()));
                if dx > start && dx < end - 1 {
                    outer.push(Element::plain(ElementKind::Glyph));
                }
            } else {
                outer.push(Element::plain(ElementKind::Text));
            }
        }
        4 => {
            let end = REMOVE_LABEL.len() + 2;
            if dx < end {
                outer.push(Element::button(view.remove.clone()));
                if dx > 0 && dx < end - 1 {
                    outer.push(Element::plain(ElementKind::Text));
                }
            }
        }
        _ => outer.push(Element::plain(ElementKind::Text)),
    }
    innermost_first(outer)
}

fn innermost_first(mut outer: Vec<Element>) -> Vec<Element> {
    outer.reverse();
    outer
}
