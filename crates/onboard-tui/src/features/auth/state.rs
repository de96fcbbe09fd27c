//! Published authentication state.

use onboard_core::auth::{AuthError, AuthState, UserIdentity};

/// Holds the latest `AuthState`.
///
/// Only the auth bridge replaces it, and only with an outcome reported by
/// the collaborator.
#[derive(Debug, Clone, Default)]
pub struct AuthStore {
    current: AuthState,
    revision: u64,
    /// Navigation revision the current error was published under.
    error_nav_revision: Option<u64>,
}

impl AuthStore {
    pub fn current(&self) -> &AuthState {
        &self.current
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.current.user.as_ref()
    }

    pub fn error(&self) -> Option<&AuthError> {
        self.current.error.as_ref()
    }

    /// The current error, if it was published while the screen at
    /// `nav_revision` was showing. Navigating away hides it.
    pub fn form_error(&self, nav_revision: u64) -> Option<&AuthError> {
        if self.error_nav_revision == Some(nav_revision) {
            self.error()
        } else {
            None
        }
    }

    /// Number of replacements since startup.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn replace(&mut self, state: AuthState) {
        self.current = state;
        self.revision = self.revision.wrapping_add(1);
        self.error_nav_revision = None;
    }

    pub(crate) fn pin_error(&mut self, nav_revision: u64) {
        if self.current.error.is_some() {
            self.error_nav_revision = Some(nav_revision);
        }
    }
}
