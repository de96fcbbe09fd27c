//! Terminal-free driver for the same reducer and effect pipeline.
//!
//! Used by the `script` command and by tests. Effects run through the same
//! task lifecycle as the terminal runtime; `settle` waits for them.

use std::sync::Arc;

use onboard_core::auth::{AuthCollaborator, AuthState, Credentials};
use onboard_core::config::Config;
use onboard_core::navigation::{Screen, UserAction};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::{Intent, UiEvent};
use crate::runtime::inbox::{self, UiEventReceiver, UiEventSender};
use crate::runtime::{handlers, spawn_task};
use crate::state::AppState;
use crate::update;

pub struct HeadlessSession {
    state: AppState,
    auth: Arc<dyn AuthCollaborator>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    /// Effects produced by `dispatch` and not yet performed.
    queued: Vec<UiEffect>,
    /// Spawned tasks whose completion has not been applied.
    in_flight: usize,
}

impl HeadlessSession {
    /// Creates a session positioned on the start screen.
    pub fn new(config: Config, auth: Arc<dyn AuthCollaborator>) -> Self {
        let (inbox_tx, inbox_rx) = inbox::channel();
        let mut session = Self {
            state: AppState::new(config),
            auth,
            inbox_tx,
            inbox_rx,
            queued: Vec::new(),
            in_flight: 0,
        };
        session.send(Intent::Start);
        session
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn current_screen(&self) -> Screen {
        self.state.nav.current()
    }

    /// Back stack entries, oldest first, ending with the current screen.
    pub fn history(&self) -> Vec<Screen> {
        self.state.nav.stack().entries()
    }

    pub fn auth_state(&self) -> &AuthState {
        self.state.auth.current()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0 || !self.queued.is_empty()
    }

    /// Applies `intent` and starts any resulting collaborator calls.
    pub fn send(&mut self, intent: Intent) {
        let effects = update::update(&mut self.state, UiEvent::Intent(intent));
        self.execute_effects(effects);
    }

    /// Applies `intent` but holds its effects until `perform`.
    ///
    /// Lets callers change screens between a submission and its outcome.
    pub fn dispatch(&mut self, intent: Intent) {
        let effects = update::update(&mut self.state, UiEvent::Intent(intent));
        self.queued.extend(effects);
    }

    /// Starts every effect held back by `dispatch`.
    pub fn perform(&mut self) {
        let effects = std::mem::take(&mut self.queued);
        self.execute_effects(effects);
    }

    pub fn tap(&mut self, action: UserAction) {
        self.send(Intent::Action(action));
    }

    pub fn request_navigate(&mut self, target: Screen, clear_history_to: Option<Screen>) {
        self.send(Intent::RequestNavigate {
            target,
            clear_history_to,
        });
    }

    pub fn on_logout(&mut self) {
        self.tap(UserAction::Logout);
    }

    pub fn submit_sign_in(&mut self, email: &str, password: &str) {
        self.send(Intent::SubmitSignIn(Credentials::new(email, password)));
    }

    pub fn submit_sign_up(&mut self, email: &str, password: &str) {
        self.send(Intent::SubmitSignUp(Credentials::new(email, password)));
    }

    pub fn back(&mut self) {
        self.send(Intent::Back);
    }

    /// Waits for every started collaborator call and applies its outcome.
    ///
    /// Effects still held by `dispatch` are not started.
    pub async fn settle(&mut self) {
        loop {
            while let Ok(event) = self.inbox_rx.try_recv() {
                self.apply(event);
            }
            if self.in_flight == 0 {
                break;
            }
            match self.inbox_rx.recv().await {
                Some(event) => self.apply(event),
                None => break,
            }
        }
    }

    fn apply(&mut self, event: UiEvent) {
        if matches!(event, UiEvent::TaskCompleted { .. }) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            match effect {
                UiEffect::Quit => self.state.should_quit = true,
                UiEffect::Auth { task, request } => {
                    let kind = TaskKind::for_op(request.op());
                    let auth = Arc::clone(&self.auth);
                    self.in_flight += 1;
                    spawn_task(&self.inbox_tx, kind, task, move || {
                        handlers::run_auth(auth, request)
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use onboard_core::auth::{AuthError, InMemoryAuth, UserIdentity};
    use onboard_core::config::LogoutPolicy;

    use super::*;

    fn session_with(auth: InMemoryAuth, config: Config) -> HeadlessSession {
        HeadlessSession::new(config, Arc::new(auth))
    }

    fn session() -> HeadlessSession {
        session_with(
            InMemoryAuth::default().with_account("ada@example.com", "secret1"),
            Config::default(),
        )
    }

    fn user() -> Option<UserIdentity> {
        Some(UserIdentity::new("ada@example.com"))
    }

    #[tokio::test]
    async fn test_sign_in_lands_on_profile_with_no_back_stack() {
        let mut s = session();
        s.tap(UserAction::TapLogin);
        s.tap(UserAction::ContinueWithEmail);
        s.submit_sign_in("ada@example.com", "secret1");
        s.settle().await;

        assert_eq!(s.current_screen(), Screen::Profile);
        assert_eq!(s.history(), vec![Screen::Profile]);
        assert_eq!(s.auth_state().user, user());

        s.back();
        assert!(s.should_quit());
    }

    #[tokio::test]
    async fn test_sign_up_then_logout() {
        let mut s = session();
        s.tap(UserAction::TapSignUp);
        s.submit_sign_up("new@example.com", "secret2");
        s.settle().await;
        assert_eq!(s.current_screen(), Screen::Profile);

        s.on_logout();
        assert_eq!(s.current_screen(), Screen::Splash);
        s.settle().await;

        assert_eq!(s.history(), vec![Screen::Splash]);
        assert_eq!(s.auth_state(), &AuthState::empty());
    }

    #[tokio::test]
    async fn test_wrong_password_keeps_form() {
        let mut s = session();
        s.tap(UserAction::TapLogin);
        s.tap(UserAction::ContinueWithEmail);
        s.submit_sign_in("ada@example.com", "nope123");
        s.settle().await;

        assert_eq!(s.current_screen(), Screen::SignIn);
        assert_eq!(s.auth_state().error, Some(AuthError::WrongPassword));
        assert_eq!(s.auth_state().user, None);
    }

    #[tokio::test]
    async fn test_outcome_after_leaving_form_is_published_without_navigation() {
        let mut s = session();
        s.tap(UserAction::TapSignUp);
        s.dispatch(Intent::SubmitSignIn(Credentials::new(
            "ada@example.com",
            "secret1",
        )));
        s.back();
        assert_eq!(s.current_screen(), Screen::Splash);

        s.perform();
        s.settle().await;

        assert_eq!(s.current_screen(), Screen::Splash);
        assert_eq!(s.auth_state().user, user());
    }

    #[tokio::test]
    async fn test_auth_success_is_idempotent_on_profile() {
        let mut s = session();
        s.request_navigate(Screen::SignIn, None);
        s.submit_sign_in("ada@example.com", "secret1");
        s.settle().await;
        let revision = s.state().nav.revision();

        s.submit_sign_in("ada@example.com", "secret1");
        s.settle().await;

        assert_eq!(s.history(), vec![Screen::Profile]);
        assert_eq!(s.state().nav.revision(), revision);
    }

    #[tokio::test(start_paused = true)]
    async fn test_awaited_logout_stays_until_sign_out_completes() {
        let config = Config {
            logout_policy: LogoutPolicy::AwaitSignOut,
            ..Config::default()
        };
        let auth = InMemoryAuth::new(Duration::from_millis(50), 6)
            .with_account("ada@example.com", "secret1");
        let mut s = session_with(auth, config);
        s.request_navigate(Screen::SignIn, None);
        s.submit_sign_in("ada@example.com", "secret1");
        s.settle().await;

        s.on_logout();
        assert_eq!(s.current_screen(), Screen::Profile);
        assert!(s.is_busy());

        s.settle().await;
        assert_eq!(s.history(), vec![Screen::Splash]);
    }

    #[tokio::test]
    async fn test_double_submit_starts_one_call() {
        let mut s = session();
        s.tap(UserAction::TapSignUp);
        s.dispatch(Intent::SubmitSignUp(Credentials::new("x@example.com", "secret3")));
        s.dispatch(Intent::SubmitSignUp(Credentials::new("x@example.com", "secret3")));
        s.perform();
        assert_eq!(s.in_flight, 1);
        s.settle().await;
        assert_eq!(s.current_screen(), Screen::Profile);
    }
}
