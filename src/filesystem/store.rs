use crate::filesystem::secure::write_with_backups;
use crate::vault::ports::KeyValueStorage;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_BACKUPS: usize = 2;

/// One file per key inside a directory.
pub struct FileKeyValueStore {
    dir: PathBuf,
    backups: usize,
}

impl FileKeyValueStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir, backups: DEFAULT_BACKUPS }
    }

    pub fn new_with_backups(dir: PathBuf, backups: usize) -> Self {
        Self { dir, backups }
    }

    /// File that holds the value for `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && key != "."
            && key != "..";
        if !valid {
            return Err(anyhow!("invalid storage key \"{key}\""));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStorage for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read storage file {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        write_with_backups(&path, value.as_bytes(), self.backups)
    }
}
