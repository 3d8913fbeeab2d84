use crate::vault::generator::{GenOptions, DEFAULT_LENGTH};
use crate::vault::models::RecordInput;

/// Focusable controls, in Tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Title,
    Login,
    Url,
    Secret,
    Length,
    Uppercase,
    Numbers,
    Symbols,
    Generate,
    Table,
}

const ORDER: [Focus; 10] = [
    Focus::Title,
    Focus::Login,
    Focus::Url,
    Focus::Secret,
    Focus::Length,
    Focus::Uppercase,
    Focus::Numbers,
    Focus::Symbols,
    Focus::Generate,
    Focus::Table,
];

/// UI-only state: form inputs, generator controls, selection, toast.
/// Records live in the vault service, never here.
pub struct App {
    pub focus: Focus,
    pub form: RecordInput,
    pub length_input: String,
    pub include_uppercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
    pub selected: usize,
    toast: Option<String>,
    toast_ticks: u16,
}

impl App {
    pub fn new(defaults: GenOptions) -> Self {
        Self {
            focus: Focus::Title,
            form: RecordInput::default(),
            length_input: defaults.length.to_string(),
            include_uppercase: defaults.include_uppercase,
            include_numbers: defaults.include_numbers,
            include_symbols: defaults.include_symbols,
            selected: 0,
            toast: None,
            toast_ticks: 0,
        }
    }

    pub fn next_focus(&mut self) {
        let i = ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ORDER[(i + 1) % ORDER.len()];
    }

    pub fn prev_focus(&mut self) {
        let i = ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = ORDER[(i + ORDER.len() - 1) % ORDER.len()];
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Title => Some(&mut self.form.title),
            Focus::Login => Some(&mut self.form.user),
            Focus::Url => Some(&mut self.form.link),
            Focus::Secret => Some(&mut self.form.secret),
            Focus::Length => Some(&mut self.length_input),
            _ => None,
        }
    }

    pub fn type_char(&mut self, c: char) {
        if self.focus == Focus::Length && !c.is_ascii_digit() {
            return;
        }
        if let Some(field) = self.field_mut() {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.field_mut() {
            field.pop();
        }
    }

    /// Flip the focused checkbox. Returns false when focus is not a checkbox.
    pub fn toggle_option(&mut self) -> bool {
        match self.focus {
            Focus::Uppercase => self.include_uppercase = !self.include_uppercase,
            Focus::Numbers => self.include_numbers = !self.include_numbers,
            Focus::Symbols => self.include_symbols = !self.include_symbols,
            _ => return false,
        }
        true
    }

    /// Generator options as entered. An unparseable length falls back to the
    /// default; range clamping is left to the generator.
    pub fn gen_options(&self) -> GenOptions {
        GenOptions {
            length: self.length_input.parse().unwrap_or(DEFAULT_LENGTH),
            include_uppercase: self.include_uppercase,
            include_numbers: self.include_numbers,
            include_symbols: self.include_symbols,
        }
    }

    pub fn clear_form(&mut self) {
        self.form = RecordInput::default();
    }

    pub fn select_next(&mut self, rows: usize) {
        if rows == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(rows - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self, rows: usize) {
        if self.selected >= rows {
            self.selected = rows.saturating_sub(1);
        }
    }

    pub fn toast(&mut self, msg: impl Into<String>) {
        self.toast = Some(msg.into());
        self.toast_ticks = 10; // ~2s at 200ms tick
    }

    pub fn toast_message(&self) -> Option<&str> {
        self.toast.as_deref()
    }

    pub fn tick(&mut self) {
        if self.toast_ticks > 0 {
            self.toast_ticks -= 1;
            if self.toast_ticks == 0 {
                self.toast = None;
            }
        }
    }
}
