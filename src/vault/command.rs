use anyhow::Result;

use crate::vault::errors::ValidationError;
use crate::vault::generator::{self, GenOptions};
use crate::vault::models::RecordInput;
use crate::vault::ports::Rng;
use crate::vault::state::{validate, VaultState};

/// Every user intent the vault understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(RecordInput),
    Remove(String),
    ToggleMask(String),
    Generate(GenOptions),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State was (possibly) mutated and must be persisted and re-rendered.
    Committed(Change),
    /// Command referenced nothing; state untouched, nothing to write.
    Ignored,
    /// Input failed validation; state untouched.
    Rejected(ValidationError),
    /// Fresh password for the form; state untouched.
    Generated(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added { id: String },
    Removed { id: String, found: bool },
    MaskToggled { id: String, masked: bool },
}

/// Apply one command to the state. Side effects (storage, drawing, alerts)
/// belong to the caller.
pub fn reduce(state: &mut VaultState, command: Command, rng: &dyn Rng) -> Result<Outcome> {
    let outcome = match command {
        Command::Add(input) => match validate(&input) {
            Ok(()) => Outcome::Committed(Change::Added { id: state.add(input, rng)? }),
            Err(e) => Outcome::Rejected(e),
        },
        // Removal always commits, even for an unknown id.
        Command::Remove(id) => {
            let found = state.remove(&id);
            Outcome::Committed(Change::Removed { id, found })
        }
        Command::ToggleMask(id) => match state.toggle_mask(&id) {
            Some(masked) => Outcome::Committed(Change::MaskToggled { id, masked }),
            None => Outcome::Ignored,
        },
        Command::Generate(options) => Outcome::Generated(generator::generate(rng, &options)?),
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::generator::SystemRng;

    fn seeded() -> (VaultState, String) {
        let mut state = VaultState::default();
        let out = reduce(
            &mut state,
            Command::Add(RecordInput::new("Mail", "a@b.com", "", "x1")),
            &SystemRng,
        )
        .unwrap();
        let Outcome::Committed(Change::Added { id }) = out else {
            panic!("expected add to commit, got {out:?}");
        };
        (state, id)
    }

    #[test]
    fn add_commits_and_appends_last() {
        let (mut state, _) = seeded();
        let out = reduce(
            &mut state,
            Command::Add(RecordInput::new("Bank", "me", "https://bank", "pw")),
            &SystemRng,
        )
        .unwrap();
        assert!(matches!(out, Outcome::Committed(Change::Added { .. })));
        assert_eq!(state.len(), 2);
        assert_eq!(state.records()[1].title, "Bank");
    }

    #[test]
    fn invalid_add_is_rejected_without_change() {
        let (mut state, _) = seeded();
        let before = state.clone();
        let out = reduce(
            &mut state,
            Command::Add(RecordInput::new("t", "", "", "pw")),
            &SystemRng,
        )
        .unwrap();
        assert_eq!(out, Outcome::Rejected(ValidationError::MissingUser));
        assert_eq!(state, before);
    }

    #[test]
    fn remove_unknown_id_leaves_records_alone() {
        let (mut state, _) = seeded();
        let before = state.clone();
        let out = reduce(&mut state, Command::Remove("missing".into()), &SystemRng).unwrap();
        assert_eq!(
            out,
            Outcome::Committed(Change::Removed { id: "missing".into(), found: false })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn double_toggle_restores_mask_and_secret() {
        let (mut state, id) = seeded();
        let before = state.get(&id).cloned().unwrap();
        reduce(&mut state, Command::ToggleMask(id.clone()), &SystemRng).unwrap();
        assert!(!state.get(&id).unwrap().masked);
        reduce(&mut state, Command::ToggleMask(id.clone()), &SystemRng).unwrap();
        assert_eq!(state.get(&id).unwrap(), &before);
    }

    #[test]
    fn toggle_unknown_id_is_ignored() {
        let (mut state, _) = seeded();
        let out = reduce(&mut state, Command::ToggleMask("nope".into()), &SystemRng).unwrap();
        assert_eq!(out, Outcome::Ignored);
    }

    #[test]
    fn generate_leaves_state_untouched() {
        let (mut state, _) = seeded();
        let before = state.clone();
        let out = reduce(&mut state, Command::Generate(GenOptions::default()), &SystemRng).unwrap();
        match out {
            Outcome::Generated(pw) => assert_eq!(pw.len(), 12),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(state, before);
    }
}
