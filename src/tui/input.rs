use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::tui::app::{App, Focus};
use crate::tui::layout::{areas, hit_test, table_offset, visible_rows};
use crate::vault::command::{Change, Outcome};
use crate::vault::dispatcher::UiEvent;
use crate::vault::service::VaultService;
use crate::view::snapshot::AlertQueue;
use crate::view::table::{Affordance, TableView};
use crate::view::target::{Element, ElementKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn handle_key(
    app: &mut App,
    service: &mut VaultService,
    alerts: &AlertQueue,
    key: KeyEvent,
) -> Result<Flow> {
    if alerts.dismiss().is_some() {
        return Ok(Flow::Continue);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return Ok(Flow::Quit),
        KeyCode::Char('c') if ctrl => return Ok(Flow::Quit),
        KeyCode::Char('g') if ctrl => {
            let event = UiEvent::GenerateClick(app.gen_options());
            send(app, service, event)?;
            return Ok(Flow::Continue);
        }
        KeyCode::Tab => app.next_focus(),
        KeyCode::BackTab => app.prev_focus(),
        _ if app.focus == Focus::Table => return table_key(app, service, key.code),
        KeyCode::Enter if app.focus == Focus::Generate => {
            let event = UiEvent::GenerateClick(app.gen_options());
            send(app, service, event)?;
        }
        KeyCode::Enter | KeyCode::Char(' ') if app.toggle_option() => {}
        KeyCode::Enter => {
            let event = UiEvent::Submit(app.form.clone());
            send(app, service, event)?;
        }
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) if !ctrl => app.type_char(c),
        _ => {}
    }
    Ok(Flow::Continue)
}

fn table_key(app: &mut App, service: &mut VaultService, code: KeyCode) -> Result<Flow> {
    let table = service.table();
    match code {
        KeyCode::Char('q') => return Ok(Flow::Quit),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(table.rows().len()),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char('m') | KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(row) = table.rows().get(app.selected) {
                send(app, service, UiEvent::Click(button_path(row.mask.clone())))?;
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(row) = table.rows().get(app.selected) {
                send(app, service, UiEvent::Click(button_path(row.remove.clone())))?;
            }
        }
        _ => {}
    }
    Ok(Flow::Continue)
}

/// Keyboard activation goes through the same path resolution as a click on
/// the button itself.
fn button_path(affordance: Affordance) -> Vec<Element> {
    vec![
        Element::button(affordance),
        Element::plain(ElementKind::Cell),
        Element::plain(ElementKind::Row),
        Element::plain(ElementKind::Table),
    ]
}

pub fn handle_mouse(
    app: &mut App,
    service: &mut VaultService,
    alerts: &AlertQueue,
    screen: Rect,
    mouse: MouseEvent,
) -> Result<()> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Ok(());
    }
    if alerts.dismiss().is_some() {
        return Ok(());
    }
    let table_area = areas(screen).table;
    let table: TableView = service.table();
    let offset = table_offset(app.selected, visible_rows(table_area));
    let path = hit_test(table_area, &table, offset, mouse.column, mouse.row);
    if path.is_empty() {
        return Ok(());
    }
    app.focus = Focus::Table;
    if path.iter().any(|e| e.kind == ElementKind::Row) && !table.rows().is_empty() {
        // header rows are excluded by hit_test, so the row is mouse.row - first
        let first = table_area.y + 3;
        app.selected = offset + mouse.row.saturating_sub(first) as usize;
    }
    send(app, service, UiEvent::Click(path))
}

fn send(app: &mut App, service: &mut VaultService, event: UiEvent) -> Result<()> {
    match service.handle(event)? {
        Some(Outcome::Committed(Change::Added { .. })) => {
            app.clear_form();
            app.focus = Focus::Title;
            app.toast("Saved");
        }
        Some(Outcome::Committed(Change::Removed { .. })) => app.toast("Deleted"),
        Some(Outcome::Generated(secret)) => {
            app.form.secret = secret;
            app.toast("Password generated");
        }
        _ => {}
    }
    app.clamp_selection(service.records().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::generator::{GenOptions, SystemRng};
    use crate::vault::persistence::{InMemoryStorage, Persistence};
    use crate::vault::codec::JsonCodec;
    use crate::view::snapshot::SnapshotRenderer;
    use std::sync::Arc;

    fn setup() -> (App, VaultService, AlertQueue) {
        let persistence = Persistence::new(Arc::new(InMemoryStorage::new()), Arc::new(JsonCodec));
        let alerts = AlertQueue::new();
        let service = VaultService::open(
            persistence,
            Arc::new(SystemRng),
            Box::new(SnapshotRenderer::new()),
            Box::new(alerts.clone()),
        )
        .unwrap();
        (App::new(GenOptions::default()), service, alerts)
    }

    fn press(app: &mut App, svc: &mut VaultService, alerts: &AlertQueue, code: KeyCode) -> Flow {
        handle_key(app, svc, alerts, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    fn type_str(app: &mut App, svc: &mut VaultService, alerts: &AlertQueue, s: &str) {
        for c in s.chars() {
            press(app, svc, alerts, KeyCode::Char(c));
        }
    }

    #[test]
    fn submit_adds_record_and_clears_form() {
        let (mut app, mut svc, alerts) = setup();
        type_str(&mut app, &mut svc, &alerts, "Mail");
        press(&mut app, &mut svc, &alerts, KeyCode::Tab);
        type_str(&mut app, &mut svc, &alerts, "a@b.com");
        app.focus = Focus::Secret;
        type_str(&mut app, &mut svc, &alerts, "x1");
        press(&mut app, &mut svc, &alerts, KeyCode::Enter);

        assert_eq!(svc.records().len(), 1);
        assert_eq!(svc.records()[0].user, "a@b.com");
        assert!(app.form.secret.is_empty());
        assert!(alerts.is_empty());
    }

    #[test]
    fn invalid_submit_raises_alert_and_next_key_dismisses() {
        let (mut app, mut svc, alerts) = setup();
        type_str(&mut app, &mut svc, &alerts, "Only title");
        press(&mut app, &mut svc, &alerts, KeyCode::Enter);
        assert_eq!(alerts.len(), 1);
        assert_eq!(app.form.title, "Only title");

        press(&mut app, &mut svc, &alerts, KeyCode::Char('z'));
        assert!(alerts.is_empty());
        assert_eq!(app.form.title, "Only title");
    }

    #[test]
    fn table_keys_toggle_and_remove_selected() {
        let (mut app, mut svc, alerts) = setup();
        app.form = crate::vault::models::RecordInput::new("Mail", "a@b.com", "", "x1");
        app.focus = Focus::Secret;
        press(&mut app, &mut svc, &alerts, KeyCode::Enter);

        app.focus = Focus::Table;
        press(&mut app, &mut svc, &alerts, KeyCode::Char('m'));
        assert!(!svc.records()[0].masked);
        press(&mut app, &mut svc, &alerts, KeyCode::Char('d'));
        assert!(svc.records().is_empty());
        assert_eq!(svc.table(), TableView::Placeholder);
    }

    #[test]
    fn ctrl_g_fills_secret_field() {
        let (mut app, mut svc, alerts) = setup();
        let key = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL);
        handle_key(&mut app, &mut svc, &alerts, key).unwrap();
        assert_eq!(app.form.secret.chars().count(), 12);
        assert!(svc.records().is_empty());
    }

    #[test]
    fn escape_quits() {
        let (mut app, mut svc, alerts) = setup();
        assert_eq!(press(&mut app, &mut svc, &alerts, KeyCode::Esc), Flow::Quit);
    }
}
