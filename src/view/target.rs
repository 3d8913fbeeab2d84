use crate::view::table::Affordance;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Table,
    Row,
    Cell,
    Button,
    Glyph,
    Text,
}

/// One node on the path from a click target up to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub affordance: Option<Affordance>,
}

impl Element {
    pub fn plain(kind: ElementKind) -> Self {
        Self { kind, affordance: None }
    }

    pub fn button(affordance: Affordance) -> Self {
        Self {
            kind: ElementKind::Button,
            affordance: Some(affordance),
        }
    }
}

/// Nearest enclosing button of the click target, if it carries an action.
/// `path[0]` is the element that was hit; later entries are its ancestors.
pub fn resolve(path: &[Element]) -> Option<&Affordance> {
    path.iter()
        .find(|e| e.kind == ElementKind::Button)
        .and_then(|button| button.affordance.as_ref())
}
