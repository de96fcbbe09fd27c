//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O or spawns tasks directly.

use onboard_core::auth::AuthRequest;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Forward a request to the auth collaborator.
    ///
    /// The reducer has already marked `task` active; the runtime reports
    /// completion through `UiEvent::TaskCompleted`.
    Auth { task: TaskId, request: AuthRequest },
}
