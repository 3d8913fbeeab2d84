use serde::{Deserialize, Serialize};

/// Title shown when the user leaves the title field empty.
pub const DEFAULT_TITLE: &str = "Untitled";

/// One stored credential. Field names on the wire match the browser app,
/// so a blob exported from local storage loads as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub user: String,
    #[serde(default)]
    pub link: String,
    pub secret: String,
    #[serde(rename = "isMasked", default = "masked_by_default")]
    pub masked: bool,
}

fn masked_by_default() -> bool {
    true
}

impl CredentialRecord {
    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }
}

/// Raw values of the four form inputs, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordInput {
    pub title: String,
    pub user: String,
    pub link: String,
    pub secret: String,
}

impl RecordInput {
    pub fn new(
        title: impl Into<String>,
        user: impl Into<String>,
        link: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            user: user.into(),
            link: link.into(),
            secret: secret.into(),
        }
    }

    /// Build a record with the given id. New records start masked.
    pub fn into_record(self, id: String) -> CredentialRecord {
        let title = if self.title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            self.title
        };
        CredentialRecord {
            id,
            title,
            user: self.user,
            link: self.link,
            secret: self.secret,
            masked: true,
        }
    }
}
