use anyhow::Result;

use super::models::CredentialRecord;
use crate::view::table::TableView;

// Randomness provider for deterministic testing.
pub trait Rng: Send + Sync {
    fn fill(&self, bytes: &mut [u8]) -> Result<()>;
}

pub trait VaultCodec: Send + Sync {
    fn encode(&self, records: &[CredentialRecord]) -> Result<String>;
    fn decode(&self, data: &str) -> Result<Vec<CredentialRecord>>;
}

/// String key-value storage bound to one installation, the local-storage
/// equivalent. A `set` replaces the whole value.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Receives a freshly projected table after every mutation.
pub trait Renderer {
    fn render(&mut self, table: &TableView);
}

/// Blocking user notification (the browser `alert`).
pub trait Notifier {
    fn alert(&mut self, message: &str);
}
