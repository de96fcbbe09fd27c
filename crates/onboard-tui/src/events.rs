//! UI event types.
//!
//! All external inputs (terminal, presentation intents, async results) are
//! converted to `UiEvent` before being processed by the reducer.
//!
//! ## Inbox Pattern
//!
//! Async operations send events directly to the runtime's event inbox.
//! Results arrive as separate events.
//!
//! ## Task Lifecycle Events
//!
//! Auth calls use a uniform lifecycle:
//! - The runtime emits `UiEvent::TaskStarted` once a task is actually spawned
//! - The runtime emits `UiEvent::TaskCompleted` with the result event when done
//! - The reducer is the only place that mutates `TaskState`

use crossterm::event::Event as CrosstermEvent;
use onboard_core::auth::{AuthOp, AuthState, Credentials};
use onboard_core::navigation::{Screen, UserAction};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Requests the presentation layer makes of the controller.
///
/// Key handling produces these; the headless session builds them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Reset to the initial screen with empty history.
    Start,
    /// A tap that appears in the transition table.
    Action(UserAction),
    /// Explicit navigation, optionally clearing history down to a screen.
    RequestNavigate {
        target: Screen,
        clear_history_to: Option<Screen>,
    },
    SubmitSignIn(Credentials),
    SubmitSignUp(Credentials),
    Back,
    Quit,
}

#[derive(Debug)]
pub enum UiEvent {
    /// Animation/redraw tick.
    Tick,
    /// Raw terminal input.
    Terminal(CrosstermEvent),
    /// Presentation-layer request.
    Intent(Intent),
    /// A collaborator call finished with `state`.
    AuthCompleted { op: AuthOp, state: AuthState },
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },
}

impl From<Intent> for UiEvent {
    fn from(intent: Intent) -> Self {
        UiEvent::Intent(intent)
    }
}
