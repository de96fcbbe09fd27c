use std::sync::Arc;

use onboard_core::auth::{AuthCollaborator, AuthRequest};

use crate::events::UiEvent;

/// Runs `request` against the collaborator and wraps the outcome.
pub async fn run_auth(auth: Arc<dyn AuthCollaborator>, request: AuthRequest) -> UiEvent {
    let op = request.op();
    let state = auth.execute(request).await;
    UiEvent::AuthCompleted { op, state }
}

#[cfg(test)]
mod tests {
    use onboard_core::auth::{AuthOp, Credentials, InMemoryAuth, UserIdentity};

    use super::*;

    #[tokio::test]
    async fn test_run_auth_reports_op_and_state() {
        let auth: Arc<dyn AuthCollaborator> =
            Arc::new(InMemoryAuth::default().with_account("a@b.com", "secret"));

        let event = run_auth(auth, AuthRequest::SignIn(Credentials::new("a@b.com", "secret"))).await;

        match event {
            UiEvent::AuthCompleted { op, state } => {
                assert_eq!(op, AuthOp::SignIn);
                assert_eq!(state.user, Some(UserIdentity::new("a@b.com")));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
