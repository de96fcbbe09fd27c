//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use onboard_core::config::{self, LogoutPolicy};
use onboard_core::logging::{self, LogTarget};

mod commands;

#[derive(Parser)]
#[command(name = "onboard")]
#[command(version)]
#[command(about = "Onboarding flow: splash, login options, sign in/up, profile")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Simulated auth latency in milliseconds (overrides config)
    #[arg(long, global = true, value_name = "MS", env = "ONBOARD_LATENCY_MS")]
    latency_ms: Option<u64>,

    /// When logout navigates: optimistic or await_sign_out (overrides config)
    #[arg(long, global = true, value_name = "POLICY")]
    logout_policy: Option<LogoutPolicy>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Drive the flow without a terminal and print each resulting screen
    Script {
        /// Steps: login, signup, email, signup-link, switch, logout, back,
        /// sign-in:EMAIL:PASSWORD, sign-up:EMAIL:PASSWORD, goto:SCREEN[:CLEAR_TO]
        #[arg(value_name = "STEP", required = true)]
        steps: Vec<String>,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the navigation transition table
    Routes,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print a fresh config generated from the built-in defaults
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        latency_ms,
        logout_policy,
    } = cli;

    // Config subcommands must work even when the file is broken.
    if let Some(Commands::Config { command }) = &command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        };
    }

    let mut config = config::Config::load().context("load config")?;
    if let Some(ms) = latency_ms {
        config.auth.latency_ms = ms;
    }
    if let Some(policy) = logout_policy {
        config.logout_policy = policy;
    }

    // default to the interactive flow
    let Some(command) = command else {
        return commands::interactive::run(config).await;
    };

    let _guard = logging::init(&config.log, LogTarget::Stderr)?;
    match command {
        Commands::Script { steps, json } => commands::script::run(config, &steps, json).await,
        Commands::Routes => {
            commands::routes::run();
            Ok(())
        }
        Commands::Config { .. } => Ok(()),
    }
}
