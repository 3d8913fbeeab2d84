use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::vault::ports::{Notifier, Renderer};
use crate::view::table::TableView;

/// Keeps the most recent projection so a draw loop (or a test) can read it.
#[derive(Clone, Default)]
pub struct SnapshotRenderer {
    latest: Arc<Mutex<TableView>>,
    renders: Arc<Mutex<usize>>,
}

impl SnapshotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> TableView {
        self.latest.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// How many times the table has been rebuilt.
    pub fn render_count(&self) -> usize {
        *self.renders.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Renderer for SnapshotRenderer {
    fn render(&mut self, table: &TableView) {
        *self.latest.lock().unwrap_or_else(|p| p.into_inner()) = table.clone();
        *self.renders.lock().unwrap_or_else(|p| p.into_inner()) += 1;
    }
}

/// Alerts waiting to be acknowledged; the TUI shows the front one as a modal.
#[derive(Clone, Default)]
pub struct AlertQueue {
    pending: Arc<Mutex<VecDeque<String>>>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn front(&self) -> Option<String> {
        self.pending
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .front()
            .cloned()
    }

    pub fn dismiss(&self) -> Option<String> {
        self.pending
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for AlertQueue {
    fn alert(&mut self, message: &str) {
        self.pending
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push_back(message.to_string());
    }
}

/// CLI notifier: the alert goes to stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("⚠️  {message}");
    }
}
