//! Full-screen onboarding TUI.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod headless;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};
use std::sync::Arc;

use anyhow::Result;
pub use features::{auth, navigation, screens};
pub use headless::HeadlessSession;
use onboard_core::auth::AuthCollaborator;
use onboard_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive onboarding flow until the user quits.
///
/// # Errors
/// Returns an error if stderr is not a terminal or terminal I/O fails.
pub async fn run_interactive(config: Config, auth: Arc<dyn AuthCollaborator>) -> Result<()> {
    // The TUI needs a terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `onboard script <STEP>...` for non-interactive runs."
        );
    }

    let mut runtime = TuiRuntime::new(config, auth)?;
    let result = runtime.run();
    let signed_in = runtime.state.auth.user().cloned();
    drop(runtime);
    result?;

    let mut err = stderr();
    match signed_in {
        Some(user) => writeln!(err, "Signed in as {user}. Goodbye!")?,
        None => writeln!(err, "Goodbye!")?,
    }
    Ok(())
}
