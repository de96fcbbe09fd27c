//! Auth feature reducer.
//!
//! Submissions become `UiEffect::Auth` for the runtime to execute.
//! Completions replace the published state first and only then notify the
//! navigation controller, so navigation never observes a partial update.

use onboard_core::auth::{AuthOp, AuthRequest, AuthState, Credentials};

use super::AuthStore;
use crate::common::{TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::navigation::NavigationController;

/// Starts an auth task for `request`.
///
/// Credential submissions are dropped while another sign in or sign up is in
/// flight, and a second sign-out is dropped while one is running.
pub fn submit(task_seq: &mut TaskSeq, tasks: &mut Tasks, request: AuthRequest) -> Vec<UiEffect> {
    let op = request.op();
    let kind = TaskKind::for_op(op);
    let busy = match op {
        AuthOp::SignIn | AuthOp::SignUp => tasks.is_form_busy(),
        AuthOp::SignOut => tasks.sign_out.is_running(),
    };
    if busy {
        tracing::debug!("{} ignored: request already in flight", op.label());
        return vec![];
    }

    let task = task_seq.next_id();
    tasks.state_mut(kind).begin(task);
    match &request {
        AuthRequest::SignIn(creds) | AuthRequest::SignUp(creds) => {
            tracing::info!(email = %creds.email, "submitting {}", op.label());
        }
        AuthRequest::SignOut => tracing::info!("submitting sign out"),
    }
    vec![UiEffect::Auth { task, request }]
}

pub fn submit_sign_in(
    task_seq: &mut TaskSeq,
    tasks: &mut Tasks,
    credentials: Credentials,
) -> Vec<UiEffect> {
    submit(task_seq, tasks, AuthRequest::SignIn(credentials))
}

pub fn submit_sign_up(
    task_seq: &mut TaskSeq,
    tasks: &mut Tasks,
    credentials: Credentials,
) -> Vec<UiEffect> {
    submit(task_seq, tasks, AuthRequest::SignUp(credentials))
}

pub fn submit_sign_out(task_seq: &mut TaskSeq, tasks: &mut Tasks) -> Vec<UiEffect> {
    submit(task_seq, tasks, AuthRequest::SignOut)
}

/// Publishes a collaborator outcome and notifies navigation exactly once.
///
/// A sign-out always publishes the empty state. Returns whether the current
/// screen changed.
pub fn handle_auth_completed(
    store: &mut AuthStore,
    nav: &mut NavigationController,
    op: AuthOp,
    state: AuthState,
) -> bool {
    let state = match op {
        AuthOp::SignOut => AuthState::empty(),
        AuthOp::SignIn | AuthOp::SignUp => state,
    };
    match (&state.user, &state.error) {
        (Some(user), _) => tracing::info!(%user, "{} completed", op.label()),
        (None, Some(error)) => tracing::info!(%error, "{} failed", op.label()),
        (None, None) => tracing::info!("{} completed", op.label()),
    }

    store.replace(state);
    let mut moved = nav.on_auth_state_changed(store.current());
    if op == AuthOp::SignOut {
        moved |= nav.on_sign_out_completed();
    }
    store.pin_error(nav.revision());
    moved
}
