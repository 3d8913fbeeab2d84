use crate::vault::command::{reduce, Command, Outcome};
use crate::vault::dispatcher::{command_for, UiEvent};
use crate::vault::errors::VaultError;
use crate::vault::models::CredentialRecord;
use crate::vault::persistence::Persistence;
use crate::vault::ports::{Notifier, Renderer, Rng};
use crate::vault::state::VaultState;
use crate::view::table::TableView;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// Owns the record list and keeps storage and the rendered table in step
/// with it.
pub struct VaultService {
    state: VaultState,
    persistence: Persistence,
    rng: Arc<dyn Rng>,
    renderer: Box<dyn Renderer>,
    notifier: Box<dyn Notifier>,
}

impl VaultService {
    /// Load persisted records and draw the initial table. Unparseable stored
    /// data fails here and nothing is drawn.
    pub fn open(
        persistence: Persistence,
        rng: Arc<dyn Rng>,
        renderer: Box<dyn Renderer>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self, VaultError> {
        let records = persistence.load()?;
        let mut service = Self {
            state: VaultState::new(records),
            persistence,
            rng,
            renderer,
            notifier,
        };
        service.render();
        Ok(service)
    }

    pub fn records(&self) -> &[CredentialRecord] {
        self.state.records()
    }

    pub fn state(&self) -> &VaultState {
        &self.state
    }

    pub fn table(&self) -> TableView {
        TableView::project(self.state.records())
    }

    /// Run one command through the reducer, then persist and re-render if it
    /// committed, or alert if it was rejected. A failed save leaves the
    /// in-memory records and the drawn table as they were.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, "dispatch");
        let mut next = self.state.clone();
        let outcome = reduce(&mut next, command, &*self.rng)?;
        match &outcome {
            Outcome::Committed(change) => {
                self.persistence.save(next.records())?;
                self.state = next;
                self.render();
                debug!(?change, "committed");
            }
            Outcome::Rejected(reason) => {
                warn!(%reason, "input rejected");
                self.notifier.alert(&reason.to_string());
            }
            Outcome::Ignored | Outcome::Generated(_) => {}
        }
        Ok(outcome)
    }

    /// Translate a UI event and dispatch it. `None` when the event maps to no
    /// command (a click that hit no button).
    pub fn handle(&mut self, event: UiEvent) -> Result<Option<Outcome>> {
        match command_for(event) {
            Some(command) => self.dispatch(command).map(Some),
            None => Ok(None),
        }
    }

    fn render(&mut self) {
        let table = self.table();
        self.renderer.render(&table);
    }
}
