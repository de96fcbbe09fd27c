//! `onboard config` handlers.
//!
//! These run before the config file is loaded, so a broken file can still be
//! located, regenerated or replaced.

use anyhow::{Context, Result};
use onboard_core::config::{self, Config};

/// Prints where the config file lives (honors `ONBOARD_HOME`).
pub fn path() {
    println!("{}", config::paths::config_path().display());
}

/// Writes the commented template with the default auth latency, history
/// limit and logout policy. Refuses to overwrite an existing file.
pub fn init() -> Result<()> {
    let target = config::paths::config_path();
    Config::init(&target)
        .with_context(|| format!("write onboarding config to {}", target.display()))?;
    println!("Created onboarding config at {}", target.display());
    Ok(())
}

/// Prints the defaults as TOML without touching the file system.
pub fn generate() -> Result<()> {
    let rendered = Config::generate().context("render default onboarding config")?;
    print!("{rendered}");
    Ok(())
}
