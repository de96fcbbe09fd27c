//! Headless script command.
//!
//! Drives the onboarding flow through `HeadlessSession`, one step at a time,
//! and prints where each step left the user.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use onboard_core::auth::InMemoryAuth;
use onboard_core::config::Config;
use onboard_core::navigation::{Screen, UserAction};
use onboard_tui::HeadlessSession;
use serde::Serialize;

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Tap(UserAction),
    SignIn { email: String, password: String },
    SignUp { email: String, password: String },
    Back,
    Goto {
        target: Screen,
        clear_history_to: Option<Screen>,
    },
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let head = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
        let step = match head.as_str() {
            "login" => Step::Tap(UserAction::TapLogin),
            "signup" => Step::Tap(UserAction::TapSignUp),
            "email" => Step::Tap(UserAction::ContinueWithEmail),
            "signup-link" => Step::Tap(UserAction::TapSignUpLink),
            "switch" => Step::Tap(UserAction::SwitchMode),
            "logout" => Step::Tap(UserAction::Logout),
            "back" => Step::Back,
            "sign-in" | "sign-up" => {
                let (Some(email), Some(password)) = (parts.next(), parts.next()) else {
                    anyhow::bail!("step '{s}' needs EMAIL:PASSWORD");
                };
                let (email, password) = (email.to_string(), password.to_string());
                if head == "sign-in" {
                    Step::SignIn { email, password }
                } else {
                    Step::SignUp { email, password }
                }
            }
            "goto" => {
                let target = parts
                    .next()
                    .context("goto needs a screen")?
                    .parse::<Screen>()
                    .map_err(anyhow::Error::msg)?;
                let clear_history_to = parts
                    .next()
                    .map(|s| s.parse::<Screen>().map_err(anyhow::Error::msg))
                    .transpose()?;
                Step::Goto {
                    target,
                    clear_history_to,
                }
            }
            _ => anyhow::bail!("unknown step '{s}'"),
        };
        if !matches!(step, Step::SignIn { .. } | Step::SignUp { .. } | Step::Goto { .. })
            && parts.next().is_some()
        {
            anyhow::bail!("step '{head}' takes no arguments");
        }
        Ok(step)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Tap(action) => write!(f, "{}", action.label()),
            Step::SignIn { email, .. } => write!(f, "sign in as {email}"),
            Step::SignUp { email, .. } => write!(f, "sign up as {email}"),
            Step::Back => f.write_str("back"),
            Step::Goto {
                target,
                clear_history_to: None,
            } => write!(f, "go to {target}"),
            Step::Goto {
                target,
                clear_history_to: Some(clear),
            } => write!(f, "go to {target} clearing to {clear}"),
        }
    }
}

/// Where a step left the session.
#[derive(Debug, Serialize)]
struct StepReport {
    step: String,
    screen: String,
    history: Vec<String>,
    user: Option<String>,
    error: Option<String>,
    exited: bool,
}

impl StepReport {
    fn capture(step: &Step, session: &HeadlessSession) -> Self {
        let auth = session.auth_state();
        Self {
            step: step.to_string(),
            screen: session.current_screen().to_string(),
            history: session.history().iter().map(ToString::to_string).collect(),
            user: auth.user.as_ref().map(ToString::to_string),
            error: auth.error.as_ref().map(ToString::to_string),
            exited: session.should_quit(),
        }
    }
}

/// Parses every step up front so a typo fails before anything runs.
pub fn parse_steps(raw: &[String]) -> Result<Vec<Step>> {
    raw.iter()
        .enumerate()
        .map(|(i, s)| s.parse().with_context(|| format!("step {}", i + 1)))
        .collect()
}

pub async fn run(config: Config, raw_steps: &[String], json: bool) -> Result<()> {
    let steps = parse_steps(raw_steps)?;
    let auth = Arc::new(InMemoryAuth::from_config(&config.auth));
    let mut session = HeadlessSession::new(config, auth);

    let mut reports = Vec::with_capacity(steps.len());
    for step in &steps {
        apply(&mut session, step);
        session.settle().await;
        let report = StepReport::capture(step, &session);
        tracing::debug!(step = %report.step, screen = %report.screen, "step applied");
        reports.push(report);
        if session.should_quit() {
            break;
        }
    }

    if json {
        let out = serde_json::to_string_pretty(&reports).context("serialize script report")?;
        println!("{out}");
    } else {
        for (i, report) in reports.iter().enumerate() {
            print_report(i + 1, report);
        }
    }
    Ok(())
}

fn apply(session: &mut HeadlessSession, step: &Step) {
    match step {
        Step::Tap(UserAction::Logout) => session.on_logout(),
        Step::Tap(action) => session.tap(*action),
        Step::SignIn { email, password } => session.submit_sign_in(email, password),
        Step::SignUp { email, password } => session.submit_sign_up(email, password),
        Step::Back => session.back(),
        Step::Goto {
            target,
            clear_history_to,
        } => session.request_navigate(*target, *clear_history_to),
    }
}

fn print_report(n: usize, report: &StepReport) {
    if report.exited {
        println!("{n}. {} -> exit", report.step);
        return;
    }
    println!(
        "{n}. {} -> {} [{}]",
        report.step,
        report.screen,
        report.history.join(" > ")
    );
    if let Some(user) = &report.user {
        println!("   user: {user}");
    }
    if let Some(error) = &report.error {
        println!("   error: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_steps() {
        assert_eq!(
            "login".parse::<Step>().unwrap(),
            Step::Tap(UserAction::TapLogin)
        );
        assert_eq!("BACK".parse::<Step>().unwrap(), Step::Back);
    }

    #[test]
    fn test_parse_credentials_keep_colons_in_password() {
        assert_eq!(
            "sign-in:a@b.com:pa:ss".parse::<Step>().unwrap(),
            Step::SignIn {
                email: "a@b.com".into(),
                password: "pa:ss".into(),
            }
        );
    }

    #[test]
    fn test_parse_goto_with_clear() {
        assert_eq!(
            "goto:profile:splash".parse::<Step>().unwrap(),
            Step::Goto {
                target: Screen::Profile,
                clear_history_to: Some(Screen::Splash),
            }
        );
    }

    #[test]
    fn test_parse_errors_name_the_step() {
        let err = parse_steps(&["login".into(), "fly".into()]).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("step 2"), "{msg}");
        assert!(msg.contains("unknown step 'fly'"), "{msg}");

        assert!("sign-up:a@b.com".parse::<Step>().is_err());
        assert!("login:extra".parse::<Step>().is_err());
    }

    #[tokio::test]
    async fn test_steps_drive_session() {
        let config = Config::default();
        let auth = Arc::new(InMemoryAuth::default());
        let mut session = HeadlessSession::new(config, auth);
        for step in parse_steps(&[
            "signup".into(),
            "sign-up:new@example.com:secret1".into(),
        ])
        .unwrap()
        {
            apply(&mut session, &step);
            session.settle().await;
        }
        assert_eq!(session.current_screen(), Screen::Profile);
    }
}
