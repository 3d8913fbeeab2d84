use crate::vault::errors::VaultError;
use crate::vault::models::CredentialRecord;
use crate::vault::ports::{KeyValueStorage, VaultCodec};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Fixed key under which the whole record list lives.
pub const NAMESPACE_KEY: &str = "my_secure_pwa_db";

/// Reads and writes the full record list under [`NAMESPACE_KEY`].
pub struct Persistence {
    storage: Arc<dyn KeyValueStorage>,
    codec: Arc<dyn VaultCodec>,
}

impl Persistence {
    pub fn new(storage: Arc<dyn KeyValueStorage>, codec: Arc<dyn VaultCodec>) -> Self {
        Self { storage, codec }
    }

    /// Missing or blank blob yields an empty list. A blob that does not parse
    /// is an error; the caller is expected to abort startup.
    pub fn load(&self) -> Result<Vec<CredentialRecord>, VaultError> {
        let blob = self.storage.get(NAMESPACE_KEY).map_err(|source| VaultError::Read {
            key: NAMESPACE_KEY.to_string(),
            source,
        })?;
        let Some(blob) = blob.filter(|b| !b.trim().is_empty()) else {
            info!(key = NAMESPACE_KEY, "no stored records, starting empty");
            return Ok(Vec::new());
        };
        let records = self.codec.decode(&blob).map_err(|source| VaultError::Corrupt {
            key: NAMESPACE_KEY.to_string(),
            source,
        })?;
        info!(key = NAMESPACE_KEY, count = records.len(), "loaded records");
        Ok(records)
    }

    pub fn save(&self, records: &[CredentialRecord]) -> Result<(), VaultError> {
        let write_err = |source: anyhow::Error| VaultError::Write {
            key: NAMESPACE_KEY.to_string(),
            source,
        };
        let blob = self.codec.encode(records).map_err(write_err)?;
        self.storage.set(NAMESPACE_KEY, &blob).map_err(write_err)?;
        debug!(key = NAMESPACE_KEY, count = records.len(), "saved records");
        Ok(())
    }
}

/// Process-local storage, used by tests and embedders that persist elsewhere.
#[derive(Default)]
pub struct InMemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::codec::JsonCodec;

    fn persistence(storage: Arc<InMemoryStorage>) -> Persistence {
        Persistence::new(storage, Arc::new(JsonCodec))
    }

    #[test]
    fn absent_key_loads_empty() {
        let p = persistence(Arc::new(InMemoryStorage::new()));
        assert!(p.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_blob_is_corrupt() {
        let storage = Arc::new(InMemoryStorage::with_entry(NAMESPACE_KEY, "[{oops"));
        let err = persistence(storage).load().unwrap_err();
        assert!(matches!(err, VaultError::Corrupt { .. }));
    }
}
