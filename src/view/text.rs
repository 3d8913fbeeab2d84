use comfy_table::{ContentArrangement, Table};
use std::io::{self, Write};

use crate::vault::ports::Renderer;
use crate::view::table::{TableView, EMPTY_PLACEHOLDER};

const HEADERS: [&str; 5] = ["ID", "Title", "Login", "URL", "Password"];

/// Bordered table, one line per record.
pub fn render_text(view: &TableView) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(HEADERS.to_vec());

    if view.rows().is_empty() {
        table.add_row(vec![EMPTY_PLACEHOLDER]);
    }
    for r in view.rows() {
        table.add_row(vec![
            r.id.as_str(),
            r.title.as_str(),
            r.user.as_str(),
            r.link_text(),
            r.secret.as_str(),
        ]);
    }
    format!("{table}\n")
}

/// Renderer for one-shot CLI commands.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl TextRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, table: &TableView) {
        if let Err(e) = self.out.write_all(render_text(table).as_bytes()) {
            tracing::warn!(error = %e, "failed to write table");
        }
    }
}
