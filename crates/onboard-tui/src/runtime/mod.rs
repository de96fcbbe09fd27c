//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers send `UiEvent`s directly to `inbox_tx`
//! - Runtime drains `inbox_rx` each frame to collect results
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Effect handler implementations

pub(crate) mod handlers;
pub(crate) mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use onboard_core::auth::AuthCollaborator;
use onboard_core::config::Config;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::{Intent, UiEvent};
use crate::state::AppState;
use crate::{render, terminal, update};

/// Frame interval while something is animating or the user is typing.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Spawns `f` with a TaskStarted/TaskCompleted lifecycle on `tx`.
///
/// Shared by the terminal runtime and the headless session so both report
/// collaborator results the same way.
pub(crate) fn spawn_task<F, Fut>(tx: &UiEventSender, kind: TaskKind, id: TaskId, f: F)
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = UiEvent> + Send + 'static,
{
    let tx = tx.clone();
    let _ = tx.send(UiEvent::TaskStarted {
        kind,
        started: TaskStarted { id },
    });
    tokio::spawn(async move {
        let inner = f().await;
        let completed = TaskCompleted {
            id,
            result: Box::new(inner),
        };
        let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
    });
}

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop, panic,
/// or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    auth: Arc<dyn AuthCollaborator>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    /// Last terminal event, for fast ticking while the user interacts.
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(config: Config, auth: Arc<dyn AuthCollaborator>) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = inbox::channel();
        let now = Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(config),
            auth,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until the app quits.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal input fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        self.dispatch_event(UiEvent::Intent(Intent::Start));

        let result = self.event_loop();

        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                dirty = true;
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty && !self.state.should_quit {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal, then a Tick if due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tasks.is_any_running()
            || self.state.nav.is_logout_pending()
            || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Don't delay already collected events waiting on input.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Auth { task, request } => {
                let kind = TaskKind::for_op(request.op());
                let auth = Arc::clone(&self.auth);
                spawn_task(&self.inbox_tx, kind, task, move || {
                    handlers::run_auth(auth, request)
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
