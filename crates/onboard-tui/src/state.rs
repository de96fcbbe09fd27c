//! Application state composition.
//!
//! ```text
//! AppState
//! ├── nav: NavigationController (current screen + history)
//! ├── auth: AuthStore           (latest published AuthState)
//! ├── screen: ScreenState       (focus, form fields, notice)
//! ├── task_seq: TaskSeq         (async task id generator)
//! └── tasks: Tasks              (task lifecycle state)
//! ```
//!
//! The reducer is the only writer. Rendering and the headless session read it.

use onboard_core::config::Config;

use crate::auth::AuthStore;
use crate::common::{TaskSeq, Tasks};
use crate::navigation::NavigationController;
use crate::screens::ScreenState;

pub struct AppState {
    pub should_quit: bool,
    pub config: Config,
    pub nav: NavigationController,
    pub auth: AuthStore,
    pub screen: ScreenState,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let nav = NavigationController::new(config.history_limit, config.logout_policy);
        Self {
            should_quit: false,
            config,
            nav,
            auth: AuthStore::default(),
            screen: ScreenState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
