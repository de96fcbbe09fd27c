//! In-process auth collaborator.
//!
//! Accounts live in memory for the lifetime of the process. Passwords are
//! kept as SHA-256 digests salted with the normalized e-mail.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use sha2::{Digest, Sha256};

use super::{AuthCollaborator, AuthError, AuthFuture, AuthState, Credentials, UserIdentity};
use crate::config::AuthConfig;

type Digest32 = [u8; 32];

/// Auth collaborator backed by an in-memory account table.
#[derive(Debug, Clone)]
pub struct InMemoryAuth {
    accounts: Arc<Mutex<HashMap<String, Digest32>>>,
    latency: Duration,
    min_password_len: usize,
}

impl Default for InMemoryAuth {
    fn default() -> Self {
        Self::new(Duration::ZERO, AuthConfig::DEFAULT_MIN_PASSWORD_LEN)
    }
}

impl InMemoryAuth {
    pub fn new(latency: Duration, min_password_len: usize) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            latency,
            min_password_len,
        }
    }

    /// Builds a collaborator from config, seeding configured accounts.
    ///
    /// Seed accounts bypass validation so demo data can use any password.
    pub fn from_config(config: &AuthConfig) -> Self {
        let auth = Self::new(config.latency(), config.min_password_len);
        for account in &config.accounts {
            auth.insert(&account.email, &account.password);
        }
        auth
    }

    #[must_use]
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.insert(email, password);
        self
    }

    pub fn account_count(&self) -> usize {
        self.accounts().len()
    }

    /// Locks the account table. Every write is a single map insert, so a
    /// poisoned lock still guards a consistent table and is recovered.
    fn accounts(&self) -> MutexGuard<'_, HashMap<String, Digest32>> {
        self.accounts.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("account table lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }

    fn insert(&self, email: &str, password: &str) {
        let email = normalize_email(email);
        let digest = password_digest(&email, password);
        self.accounts().insert(email, digest);
    }

    fn register(&self, credentials: &Credentials) -> Result<UserIdentity, AuthError> {
        let email = validate_email(&credentials.email)?;
        if credentials.password.chars().count() < self.min_password_len {
            return Err(AuthError::PasswordTooShort {
                min: self.min_password_len,
            });
        }
        let mut accounts = self.accounts();
        if accounts.contains_key(&email) {
            return Err(AuthError::AccountExists);
        }
        let digest = password_digest(&email, &credentials.password);
        accounts.insert(email.clone(), digest);
        Ok(UserIdentity::new(email))
    }

    fn verify(&self, credentials: &Credentials) -> Result<UserIdentity, AuthError> {
        let email = validate_email(&credentials.email)?;
        let accounts = self.accounts();
        let stored = accounts.get(&email).ok_or(AuthError::UnknownAccount)?;
        if *stored != password_digest(&email, &credentials.password) {
            return Err(AuthError::WrongPassword);
        }
        Ok(UserIdentity::new(email))
    }

    async fn delay(latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

impl AuthCollaborator for InMemoryAuth {
    fn sign_in(&self, credentials: Credentials) -> AuthFuture {
        let this = self.clone();
        Box::pin(async move {
            Self::delay(this.latency).await;
            let result = this.verify(&credentials);
            log_outcome("sign in", &credentials.email, &result);
            AuthState::from_result(result)
        })
    }

    fn sign_up(&self, credentials: Credentials) -> AuthFuture {
        let this = self.clone();
        Box::pin(async move {
            Self::delay(this.latency).await;
            let result = this.register(&credentials);
            log_outcome("sign up", &credentials.email, &result);
            AuthState::from_result(result)
        })
    }

    fn sign_out(&self) -> AuthFuture {
        let latency = self.latency;
        Box::pin(async move {
            Self::delay(latency).await;
            tracing::info!("signed out");
            AuthState::empty()
        })
    }
}

fn log_outcome(op: &str, email: &str, result: &Result<UserIdentity, AuthError>) {
    match result {
        Ok(user) => tracing::info!(%user, "{op} succeeded"),
        Err(error) => tracing::warn!(email, %error, "{op} rejected"),
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Accepts `local@domain.tld`: non-empty local part, a single `@`, and a
/// domain with an interior dot.
fn validate_email(email: &str) -> Result<String, AuthError> {
    let email = normalize_email(email);
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AuthError::InvalidEmail);
    };
    let domain_ok = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));
    if local.is_empty() || domain.contains('@') || !domain_ok || email.contains(char::is_whitespace)
    {
        return Err(AuthError::InvalidEmail);
    }
    Ok(email)
}

fn password_digest(email: &str, password: &str) -> Digest32 {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update([0u8]);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> InMemoryAuth {
        InMemoryAuth::default().with_account("a@b.com", "secret1")
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let state = auth().sign_in(Credentials::new("a@b.com", "secret1")).await;
        assert_eq!(state.user, Some(UserIdentity::new("a@b.com")));
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_sign_in_normalizes_email() {
        let state = auth()
            .sign_in(Credentials::new("  A@B.com ", "secret1"))
            .await;
        assert_eq!(state.user, Some(UserIdentity::new("a@b.com")));
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let state = auth().sign_in(Credentials::new("a@b.com", "nope")).await;
        assert_eq!(state.user, None);
        assert_eq!(state.error, Some(AuthError::WrongPassword));
    }

    #[tokio::test]
    async fn test_sign_in_unknown_account() {
        let state = auth().sign_in(Credentials::new("x@y.org", "secret1")).await;
        assert_eq!(state.error, Some(AuthError::UnknownAccount));
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let auth = InMemoryAuth::default();
        let up = auth.sign_up(Credentials::new("new@user.io", "longpass")).await;
        assert!(up.is_authenticated());
        assert_eq!(auth.account_count(), 1);

        let back = auth.sign_in(Credentials::new("new@user.io", "longpass")).await;
        assert!(back.is_authenticated());
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicate() {
        let state = auth().sign_up(Credentials::new("a@b.com", "another1")).await;
        assert_eq!(state.error, Some(AuthError::AccountExists));
    }

    #[tokio::test]
    async fn test_sign_up_rejects_short_password() {
        let state = auth().sign_up(Credentials::new("c@d.com", "abc")).await;
        assert_eq!(state.error, Some(AuthError::PasswordTooShort { min: 6 }));
    }

    #[tokio::test]
    async fn test_sign_out_is_empty() {
        let state = auth().sign_out().await;
        assert_eq!(state, AuthState::empty());
    }

    #[tokio::test]
    async fn test_poisoned_table_still_serves_accounts() {
        let auth = auth();
        let accounts = Arc::clone(&auth.accounts);
        let _ = std::thread::spawn(move || {
            let _guard = accounts.lock().unwrap();
            panic!("poison the table");
        })
        .join();
        assert!(auth.accounts.is_poisoned());

        assert_eq!(auth.account_count(), 1);
        let state = auth.sign_in(Credentials::new("a@b.com", "secret1")).await;
        assert!(state.is_authenticated());
        let state = auth.sign_up(Credentials::new("c@d.com", "secret2")).await;
        assert!(state.is_authenticated());
        assert_eq!(auth.account_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let auth = InMemoryAuth::new(Duration::from_millis(500), 6).with_account("a@b.com", "secret1");
        let start = tokio::time::Instant::now();
        let state = auth.sign_in(Credentials::new("a@b.com", "secret1")).await;
        assert!(state.is_authenticated());
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());
        assert_eq!(validate_email("a@b"), Err(AuthError::InvalidEmail));
        assert_eq!(validate_email("@b.com"), Err(AuthError::InvalidEmail));
        assert_eq!(validate_email("a@.com"), Err(AuthError::InvalidEmail));
        assert_eq!(validate_email("a@b@c.com"), Err(AuthError::InvalidEmail));
        assert_eq!(validate_email("a b@c.com"), Err(AuthError::InvalidEmail));
        assert_eq!(validate_email(""), Err(AuthError::InvalidEmail));
    }

    #[test]
    fn test_digest_is_salted_by_email() {
        assert_ne!(
            password_digest("a@b.com", "pw"),
            password_digest("c@d.com", "pw")
        );
    }
}
