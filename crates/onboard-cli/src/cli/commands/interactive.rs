//! Interactive TUI command handler.

use std::sync::Arc;

use anyhow::{Context, Result};
use onboard_core::auth::InMemoryAuth;
use onboard_core::config::Config;
use onboard_core::logging::{self, LogTarget};

pub async fn run(config: Config) -> Result<()> {
    // The alternate screen owns stderr, so logs go to a file.
    let _guard = logging::init(&config.log, LogTarget::File)?;
    tracing::info!(
        history_limit = config.history_limit,
        logout_policy = %config.logout_policy,
        "starting interactive session"
    );

    let auth = Arc::new(InMemoryAuth::from_config(&config.auth));
    onboard_tui::run_interactive(config, auth)
        .await
        .context("interactive session failed")
}
