//! Authentication state and the auth collaborator contract.
//!
//! `AuthState` is replaced wholesale with whatever the collaborator reports.
//! The collaborator is opaque: only its three outcomes matter (a signed-in
//! identity, a rejection, or nothing).

mod memory;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

pub use memory::InMemoryAuth;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque identity of a signed-in user (the normalized e-mail).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserIdentity(String);

impl UserIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Credential rejection reported by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Enter a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },
    #[error("An account with this email already exists.")]
    AccountExists,
    #[error("No account found for this email.")]
    UnknownAccount,
    #[error("Incorrect password.")]
    WrongPassword,
    #[error("Authentication unavailable: {0}")]
    Unavailable(String),
}

/// Latest known authentication outcome.
///
/// `user` is present iff the last sign-in or sign-up succeeded and no
/// sign-out has completed since.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<UserIdentity>,
    pub error: Option<AuthError>,
}

impl AuthState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn authenticated(user: UserIdentity) -> Self {
        Self {
            user: Some(user),
            error: None,
        }
    }

    pub fn failed(error: AuthError) -> Self {
        Self {
            user: None,
            error: Some(error),
        }
    }

    pub fn from_result(result: Result<UserIdentity, AuthError>) -> Self {
        match result {
            Ok(user) => Self::authenticated(user),
            Err(error) => Self::failed(error),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// E-mail and password submitted from a form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Which collaborator call produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthOp {
    SignIn,
    SignUp,
    SignOut,
}

impl AuthOp {
    pub fn label(self) -> &'static str {
        match self {
            AuthOp::SignIn => "sign in",
            AuthOp::SignUp => "sign up",
            AuthOp::SignOut => "sign out",
        }
    }
}

/// A pending call on the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    SignIn(Credentials),
    SignUp(Credentials),
    SignOut,
}

impl AuthRequest {
    pub fn op(&self) -> AuthOp {
        match self {
            AuthRequest::SignIn(_) => AuthOp::SignIn,
            AuthRequest::SignUp(_) => AuthOp::SignUp,
            AuthRequest::SignOut => AuthOp::SignOut,
        }
    }
}

/// Future returned by collaborator calls. Each resolves exactly once.
pub type AuthFuture = Pin<Box<dyn Future<Output = AuthState> + Send>>;

/// External component that verifies and stores credentials.
pub trait AuthCollaborator: Send + Sync {
    fn sign_in(&self, credentials: Credentials) -> AuthFuture;
    fn sign_up(&self, credentials: Credentials) -> AuthFuture;
    fn sign_out(&self) -> AuthFuture;

    /// Dispatches `request` to the matching call.
    fn execute(&self, request: AuthRequest) -> AuthFuture {
        match request {
            AuthRequest::SignIn(credentials) => self.sign_in(credentials),
            AuthRequest::SignUp(credentials) => self.sign_up(credentials),
            AuthRequest::SignOut => self.sign_out(),
        }
    }
}
