//! Table model derived from the record list.
//!
//! Projection is total: every mutation rebuilds the whole table, there is no
//! diffing or keyed reconciliation.

use crate::vault::models::CredentialRecord;

pub const MASK_PLACEHOLDER: &str = "••••••••";
pub const LINK_PLACEHOLDER: &str = "-";
pub const EMPTY_PLACEHOLDER: &str = "List is empty";
pub const REVEAL_GLYPH: &str = "👁";
pub const HIDE_GLYPH: &str = "✖";
pub const REMOVE_LABEL: &str = "Remove";

pub const COLUMN_TITLES: [&str; 5] = ["Title", "Login", "URL", "Password", "Actions"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Mask,
    Remove,
}

/// Something clickable bound to one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affordance {
    pub action: Action,
    pub key: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub title: String,
    pub user: String,
    pub link: Option<String>,
    pub secret: String,
    pub masked: bool,
    pub mask: Affordance,
    pub remove: Affordance,
}

impl RowView {
    fn project(record: &CredentialRecord) -> Self {
        let secret = if record.masked {
            MASK_PLACEHOLDER.to_string()
        } else {
            record.secret.clone()
        };
        let mask_label = if record.masked { REVEAL_GLYPH } else { HIDE_GLYPH };
        RowView {
            id: record.id.clone(),
            title: record.title.clone(),
            user: record.user.clone(),
            link: record.has_link().then(|| record.link.clone()),
            secret,
            masked: record.masked,
            mask: Affordance {
                action: Action::Mask,
                key: record.id.clone(),
                label: mask_label,
            },
            remove: Affordance {
                action: Action::Remove,
                key: record.id.clone(),
                label: REMOVE_LABEL,
            },
        }
    }

    pub fn link_text(&self) -> &str {
        self.link.as_deref().unwrap_or(LINK_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TableView {
    /// Single placeholder row shown for an empty vault.
    #[default]
    Placeholder,
    Rows(Vec<RowView>),
}

impl TableView {
    pub fn project(records: &[CredentialRecord]) -> Self {
        if records.is_empty() {
            return TableView::Placeholder;
        }
        TableView::Rows(records.iter().map(RowView::project).collect())
    }

    pub fn rows(&self) -> &[RowView] {
        match self {
            TableView::Placeholder => &[],
            TableView::Rows(rows) => rows,
        }
    }

    /// Rows as drawn, the placeholder counting as one.
    pub fn row_count(&self) -> usize {
        match self {
            TableView::Placeholder => 1,
            TableView::Rows(rows) => rows.len(),
        }
    }
}
