//! Navigation feature: the controller that owns the current screen.
//!
//! The controller applies the transition table to user actions and reacts
//! to auth state replacements. It never talks to the collaborator itself;
//! the reducer pairs `on_logout` with a sign-out submission.

use onboard_core::auth::AuthState;
use onboard_core::config::LogoutPolicy;
use onboard_core::navigation::{
    self, NavOptions, NavRequest, NavStack, Screen, UserAction, auth_success_request,
    logout_request,
};

/// Result of a back request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Moved(Screen),
    /// Nothing left in history: the app should exit.
    Exit,
}

/// Single source of truth for the current screen.
#[derive(Debug, Clone)]
pub struct NavigationController {
    stack: NavStack,
    logout_policy: LogoutPolicy,
    /// Set while an awaited logout waits for sign-out completion.
    logout_pending: bool,
    /// Bumped on every stack change so per-screen UI state can reset.
    revision: u64,
}

impl NavigationController {
    pub fn new(history_limit: usize, logout_policy: LogoutPolicy) -> Self {
        Self {
            stack: NavStack::new(Screen::Splash, history_limit),
            logout_policy,
            logout_pending: false,
            revision: 0,
        }
    }

    pub fn start(&mut self) {
        self.stack.reset(Screen::Splash);
        self.logout_pending = false;
        self.revision = self.revision.wrapping_add(1);
        tracing::debug!("navigation started at {}", Screen::Splash);
    }

    pub fn current(&self) -> Screen {
        self.stack.current()
    }

    pub fn stack(&self) -> &NavStack {
        &self.stack
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_logout_pending(&self) -> bool {
        self.logout_pending
    }

    /// Navigates to `target`, discarding history down to and including
    /// `clear_history_to` when given.
    pub fn request_navigate(&mut self, target: Screen, clear_history_to: Option<Screen>) -> bool {
        let options = clear_history_to.map(NavOptions::clear_to).unwrap_or_default();
        self.apply(NavRequest::with_options(target, options))
    }

    /// Applies the user-triggered edge for `action`, if the current screen has one.
    ///
    /// Logout is not handled here; see `on_logout`.
    pub fn on_action(&mut self, action: UserAction) -> bool {
        let from = self.current();
        match navigation::transition(from, action) {
            Some(_) if action == UserAction::Logout => self.on_logout(),
            Some(request) => self.apply(request),
            None => {
                tracing::debug!(?action, "no transition from {from}");
                false
            }
        }
    }

    /// Reacts to an auth state replacement.
    ///
    /// Only a present user observed on a credential form navigates; anywhere
    /// else the change is ignored.
    pub fn on_auth_state_changed(&mut self, state: &AuthState) -> bool {
        let from = self.current();
        if state.user.is_none() || !from.is_auth_form() {
            return false;
        }
        tracing::debug!("authenticated on {from}");
        self.apply(auth_success_request())
    }

    /// Handles the profile logout tap. The caller submits the sign-out.
    ///
    /// Under the optimistic policy this navigates to splash right away;
    /// otherwise navigation waits for `on_sign_out_completed`.
    pub fn on_logout(&mut self) -> bool {
        if self.current() != Screen::Profile {
            return false;
        }
        match self.logout_policy {
            LogoutPolicy::Optimistic => self.apply(logout_request()),
            LogoutPolicy::AwaitSignOut => {
                self.logout_pending = true;
                false
            }
        }
    }

    /// Completes an awaited logout. A no-op under the optimistic policy or
    /// when the user already left the profile screen.
    pub fn on_sign_out_completed(&mut self) -> bool {
        let pending = std::mem::take(&mut self.logout_pending);
        if pending && self.current() == Screen::Profile {
            return self.apply(logout_request());
        }
        false
    }

    pub fn back(&mut self) -> BackOutcome {
        match self.stack.back() {
            Some(screen) => {
                self.logout_pending = false;
                self.revision = self.revision.wrapping_add(1);
                tracing::debug!("back to {screen}");
                BackOutcome::Moved(screen)
            }
            None => BackOutcome::Exit,
        }
    }

    fn apply(&mut self, request: NavRequest) -> bool {
        let from = self.current();
        let changed = self.stack.navigate(request);
        if changed {
            self.revision = self.revision.wrapping_add(1);
            if self.current() != Screen::Profile {
                self.logout_pending = false;
            }
            tracing::debug!(
                depth = self.stack.depth(),
                "navigate {from} -> {}",
                self.current()
            );
        }
        changed
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(NavStack::DEFAULT_LIMIT, LogoutPolicy::default())
    }
}
