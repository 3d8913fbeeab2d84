use anyhow::Result;
use std::collections::HashSet;

use crate::vault::errors::ValidationError;
use crate::vault::generator::uniform_index;
use crate::vault::models::{CredentialRecord, RecordInput};
use crate::vault::ports::Rng;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Ordered record list. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultState {
    records: Vec<CredentialRecord>,
    /// Ids removed since the store was opened; never handed out again.
    retired: HashSet<String>,
}

impl VaultState {
    pub fn new(records: Vec<CredentialRecord>) -> Self {
        Self { records, retired: HashSet::new() }
    }

    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CredentialRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Validate and append. Returns the id of the new record; a
    /// `ValidationError` comes back as the error.
    pub fn add(&mut self, input: RecordInput, rng: &dyn Rng) -> Result<String> {
        validate(&input)?;
        let id = self.fresh_id(rng)?;
        self.records.push(input.into_record(id.clone()));
        Ok(id)
    }

    /// Drop the record with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.records.iter().position(|r| r.id == id) {
            Some(pos) => {
                let record = self.records.remove(pos);
                self.retired.insert(record.id);
                true
            }
            None => false,
        }
    }

    /// Flip the display mask. Returns the new value, or `None` if no such id.
    pub fn toggle_mask(&mut self, id: &str) -> Option<bool> {
        let record = self.records.iter_mut().find(|r| r.id == id)?;
        record.masked = !record.masked;
        Some(record.masked)
    }

    fn fresh_id(&self, rng: &dyn Rng) -> Result<String> {
        loop {
            let id = random_id(rng)?;
            if !self.contains_id(&id) && !self.retired.contains(&id) {
                return Ok(id);
            }
        }
    }
}

pub fn validate(input: &RecordInput) -> std::result::Result<(), ValidationError> {
    if input.user.is_empty() {
        return Err(ValidationError::MissingUser);
    }
    if input.secret.is_empty() {
        return Err(ValidationError::MissingSecret);
    }
    Ok(())
}

fn random_id(rng: &dyn Rng) -> Result<String> {
    let mut id = String::with_capacity(ID_LEN);
    for _ in 0..ID_LEN {
        id.push(ID_ALPHABET[uniform_index(rng, ID_ALPHABET.len())?] as char);
    }
    Ok(id)
}
