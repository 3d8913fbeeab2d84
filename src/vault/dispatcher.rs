use crate::vault::command::Command;
use crate::vault::generator::GenOptions;
use crate::vault::models::RecordInput;
use crate::view::table::{Action, Affordance};
use crate::view::target::{self, Element};

/// Raw UI events, before they become commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Form submitted with the current values of its four inputs.
    Submit(RecordInput),
    /// Click inside the table; the path runs from the hit element upwards.
    Click(Vec<Element>),
    GenerateClick(GenOptions),
}

impl From<&Affordance> for Command {
    fn from(affordance: &Affordance) -> Self {
        match affordance.action {
            Action::Mask => Command::ToggleMask(affordance.key.clone()),
            Action::Remove => Command::Remove(affordance.key.clone()),
        }
    }
}

/// Map an event to a command. Clicks that miss every button map to nothing.
pub fn command_for(event: UiEvent) -> Option<Command> {
    match event {
        UiEvent::Submit(input) => Some(Command::Add(input)),
        UiEvent::Click(path) => target::resolve(&path).map(Command::from),
        UiEvent::GenerateClick(options) => Some(Command::Generate(options)),
    }
}
