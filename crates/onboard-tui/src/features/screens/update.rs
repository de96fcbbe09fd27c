//! Screens feature reducer.
//!
//! Turns key presses into focus moves, form edits, or an `Intent` for the
//! app reducer. Nothing here touches navigation or auth state directly.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use onboard_core::navigation::{AuthMode, Screen};

use super::state::ScreenState;
use super::{Element, ElementAction, elements};
use crate::events::Intent;

/// Handles a key press on `screen`.
///
/// `busy` is true while a credential submission is in flight; submit buttons
/// do nothing until it completes.
pub fn handle_key(screen: Screen, ui: &mut ScreenState, busy: bool, key: KeyEvent) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let items = elements(screen);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(Intent::Quit),
        KeyCode::Esc => Some(Intent::Back),
        KeyCode::Char('s') if ctrl && screen.is_auth_form() => {
            ui.form.show_password = !ui.form.show_password;
            None
        }
        KeyCode::Up | KeyCode::BackTab => {
            ui.focus_prev(items.len());
            None
        }
        KeyCode::Down | KeyCode::Tab => {
            ui.focus_next(items.len());
            None
        }
        KeyCode::Enter => activate(ui, busy, &items),
        KeyCode::Backspace => {
            if let Some(Element::Field(field)) = items.get(ui.focus) {
                ui.form.field_mut(*field).pop();
                ui.form.local_error = None;
            }
            None
        }
        KeyCode::Char(c) if !ctrl => {
            if let Some(Element::Field(field)) = items.get(ui.focus) {
                ui.form.field_mut(*field).push(c);
                ui.form.local_error = None;
            }
            None
        }
        _ => None,
    }
}

/// Inserts pasted text into the focused field, dropping control characters.
pub fn handle_paste(screen: Screen, ui: &mut ScreenState, text: &str) {
    let items = elements(screen);
    let Some(Element::Field(field)) = items.get(ui.focus) else {
        return;
    };
    let target = ui.form.field_mut(*field);
    target.extend(text.chars().filter(|c| !c.is_control()));
    ui.form.local_error = None;
}

fn activate(ui: &mut ScreenState, busy: bool, items: &[Element]) -> Option<Intent> {
    let element = items.get(ui.focus)?;
    let action = match element {
        Element::Field(_) => {
            ui.focus_next(items.len());
            return None;
        }
        Element::Button { action, .. } | Element::Link { action, .. } => *action,
    };

    match action {
        ElementAction::Navigate(user_action) => Some(Intent::Action(user_action)),
        ElementAction::Submit(mode) => submit(ui, busy, mode),
        ElementAction::Unavailable => {
            ui.notice = Some(format!("{} is not available yet.", element.label()));
            None
        }
    }
}

fn submit(ui: &mut ScreenState, busy: bool, mode: AuthMode) -> Option<Intent> {
    if busy {
        return None;
    }
    let credentials = ui.form.credentials();
    match mode {
        AuthMode::SignIn => Some(Intent::SubmitSignIn(credentials)),
        AuthMode::SignUp if !ui.form.passwords_match() => {
            ui.form.local_error = Some("Passwords do not match.".to_string());
            None
        }
        AuthMode::SignUp => Some(Intent::SubmitSignUp(credentials)),
    }
}
