//! Configuration management for onboard.
//!
//! Loads configuration from ${ONBOARD_HOME}/config.toml with sensible defaults.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// When logout navigates relative to the collaborator's sign-out completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogoutPolicy {
    /// Navigate to splash immediately, sign out in the background.
    #[default]
    Optimistic,
    /// Stay on profile until sign-out completes.
    AwaitSignOut,
}

impl fmt::Display for LogoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogoutPolicy::Optimistic => f.write_str("optimistic"),
            LogoutPolicy::AwaitSignOut => f.write_str("await_sign_out"),
        }
    }
}

impl FromStr for LogoutPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "optimistic" => Ok(LogoutPolicy::Optimistic),
            "await_sign_out" | "await" => Ok(LogoutPolicy::AwaitSignOut),
            other => Err(format!(
                "unknown logout policy '{other}' (expected optimistic or await_sign_out)"
            )),
        }
    }
}

/// Account created at startup by the in-memory collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedAccount {
    pub email: String,
    pub password: String,
}

/// Auth collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Simulated round-trip time for every collaborator call.
    pub latency_ms: u64,
    /// Minimum password length accepted on sign up.
    pub min_password_len: usize,
    /// Accounts available without signing up first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<SeedAccount>,
}

impl AuthConfig {
    pub const DEFAULT_LATENCY_MS: u64 = 400;
    pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency_ms: Self::DEFAULT_LATENCY_MS,
            min_password_len: Self::DEFAULT_MIN_PASSWORD_LEN,
            accounts: Vec::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Log file for the interactive UI, relative to the logs directory.
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of screens kept in the back stack
    pub history_limit: usize,

    /// Whether logout waits for the sign-out to complete
    pub logout_policy: LogoutPolicy,

    /// Auth collaborator settings
    pub auth: AuthConfig,

    /// Logging settings
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: Self::DEFAULT_HISTORY_LIMIT,
            logout_policy: LogoutPolicy::default(),
            auth: AuthConfig::default(),
            log: LogConfig::default(),
        }
    }
}

const CONFIG_TEMPLATE: &str = r#"# onboard configuration

# Maximum number of screens kept in the back stack.
history_limit = 16

# "optimistic" navigates to the splash screen immediately on logout;
# "await_sign_out" waits for the sign-out to complete.
logout_policy = "optimistic"

[auth]
# Simulated round-trip time for sign in / sign up / sign out.
latency_ms = 400
min_password_len = 6

# [[auth.accounts]]
# email = "demo@example.com"
# password = "secret123"

[log]
level = "info"
# file = "onboard.log"
"#;

impl Config {
    const DEFAULT_HISTORY_LIMIT: usize = 16;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path`.
    ///
    /// Fails if the file already exists. Creates parent directories.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Serializes the built-in defaults.
    pub fn generate() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize default config")
    }
}

pub mod paths {
    use std::path::PathBuf;

    /// Returns the onboard home directory.
    ///
    /// Checks ONBOARD_HOME env var first, falls back to ~/.config/onboard
    pub fn onboard_home() -> PathBuf {
        if let Ok(home) = std::env::var("ONBOARD_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("onboard"))
            .unwrap_or_else(|| PathBuf::from(".onboard"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        onboard_home().join("config.toml")
    }

    /// Returns the directory holding log files.
    pub fn logs_dir() -> PathBuf {
        onboard_home().join("logs")
    }
}
