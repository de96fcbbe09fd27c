//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::Event;
use onboard_core::navigation::{Screen, UserAction};

use crate::effects::UiEffect;
use crate::events::{Intent, UiEvent};
use crate::navigation::BackOutcome;
use crate::state::AppState;
use crate::{auth, screens};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Intent(intent) => handle_intent(app, intent),
        UiEvent::AuthCompleted { op, state } => {
            auth::handle_auth_completed(&mut app.auth, &mut app.nav, op, state);
            vec![]
        }
        UiEvent::TaskStarted { kind, started } => {
            app.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if !app.tasks.state_mut(kind).finish_if_active(completed.id) {
                tracing::debug!(?kind, "completion for inactive task {:?}", completed.id);
            }
            // Collaborator outcomes are applied even when the task is stale.
            update(app, *completed.result)
        }
    };
    app.screen.sync(app.nav.revision());
    effects
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    let screen = app.nav.current();
    match event {
        Event::Key(key) => {
            let busy = app.tasks.is_form_busy();
            match screens::handle_key(screen, &mut app.screen, busy, key) {
                Some(intent) => handle_intent(app, intent),
                None => vec![],
            }
        }
        Event::Paste(text) => {
            screens::handle_paste(screen, &mut app.screen, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_intent(app: &mut AppState, intent: Intent) -> Vec<UiEffect> {
    match intent {
        Intent::Start => {
            app.nav.start();
            vec![]
        }
        Intent::Action(UserAction::Logout) => {
            if app.nav.current() != Screen::Profile {
                return vec![];
            }
            let effects = auth::submit_sign_out(&mut app.task_seq, &mut app.tasks);
            app.nav.on_logout();
            effects
        }
        Intent::Action(action) => {
            app.nav.on_action(action);
            vec![]
        }
        Intent::RequestNavigate {
            target,
            clear_history_to,
        } => {
            // Profile is only reachable with a signed-in user
            if target == Screen::Profile && app.auth.user().is_none() {
                tracing::debug!("refusing to show {target} while signed out");
                return vec![];
            }
            app.nav.request_navigate(target, clear_history_to);
            vec![]
        }
        Intent::SubmitSignIn(credentials) => {
            auth::submit_sign_in(&mut app.task_seq, &mut app.tasks, credentials)
        }
        Intent::SubmitSignUp(credentials) => {
            auth::submit_sign_up(&mut app.task_seq, &mut app.tasks, credentials)
        }
        Intent::Back => match app.nav.back() {
            BackOutcome::Moved(_) => vec![],
            BackOutcome::Exit => quit(app),
        },
        Intent::Quit => quit(app),
    }
}

fn quit(app: &mut AppState) -> Vec<UiEffect> {
    app.should_quit = true;
    vec![UiEffect::Quit]
}
