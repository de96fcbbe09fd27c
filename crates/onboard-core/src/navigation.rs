//! Screens, navigation history, and the onboarding transition table.
//!
//! The history is an explicit bounded stack. `NavStack::navigate` applies
//! pop-up-to semantics (truncate down to a marker screen, optionally
//! including it) before pushing the target, so screens removed from history
//! can never be reached again through `back`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five navigable screens of the onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Splash,
    LoginOptions,
    SignIn,
    SignUp,
    Profile,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Splash,
        Screen::LoginOptions,
        Screen::SignIn,
        Screen::SignUp,
        Screen::Profile,
    ];

    /// Stable route name used by the CLI and in logs.
    pub fn route(self) -> &'static str {
        match self {
            Screen::Splash => "splash",
            Screen::LoginOptions => "login_options",
            Screen::SignIn => "sign_in",
            Screen::SignUp => "sign_up",
            Screen::Profile => "profile",
        }
    }

    pub fn from_route(route: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|screen| screen.route() == route)
    }

    /// Human-readable title shown in the screen header.
    pub fn title(self) -> &'static str {
        match self {
            Screen::Splash => "Welcome",
            Screen::LoginOptions => "Login",
            Screen::SignIn => "Sign In",
            Screen::SignUp => "Sign Up",
            Screen::Profile => "Profile",
        }
    }

    /// Returns the form mode when this screen is one of the credential forms.
    pub fn auth_mode(self) -> Option<AuthMode> {
        match self {
            Screen::SignIn => Some(AuthMode::SignIn),
            Screen::SignUp => Some(AuthMode::SignUp),
            _ => None,
        }
    }

    pub fn is_auth_form(self) -> bool {
        self.auth_mode().is_some()
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.route())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::from_route(&normalized).ok_or_else(|| format!("unknown screen '{s}'"))
    }
}

/// Mode flag shared by the sign-in and sign-up screens.
///
/// Both screens render the same form; the mode decides labels, which fields
/// are shown, and which collaborator call the primary button makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn primary_label(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Create Account",
        }
    }

    pub fn switch_prompt(self) -> &'static str {
        match self {
            AuthMode::SignIn => "I'm a new user? ",
            AuthMode::SignUp => "I already have an account ",
        }
    }

    pub fn switch_link(self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign Up",
            AuthMode::SignUp => "Sign In",
        }
    }

    pub fn has_confirm_field(self) -> bool {
        matches!(self, AuthMode::SignUp)
    }
}

/// Pop-up-to marker: discard history down to `screen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopUpTo {
    pub screen: Screen,
    pub inclusive: bool,
}

/// Options applied to a single navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavOptions {
    pub pop_up_to: Option<PopUpTo>,
    /// Skip the push when the target is already on top after truncation.
    pub single_top: bool,
    /// Clear all history when the pop-up-to marker is not on the stack.
    pub clear_all_if_missing: bool,
}

impl NavOptions {
    /// Clears history back to and including `screen`.
    pub fn clear_to(screen: Screen) -> Self {
        Self {
            pop_up_to: Some(PopUpTo {
                screen,
                inclusive: true,
            }),
            single_top: false,
            clear_all_if_missing: false,
        }
    }

    pub fn single_top(mut self) -> Self {
        self.single_top = true;
        self
    }

    pub fn clear_all_if_missing(mut self) -> Self {
        self.clear_all_if_missing = true;
        self
    }
}

/// A navigation request: target plus history options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavRequest {
    pub target: Screen,
    pub options: NavOptions,
}

impl NavRequest {
    pub fn push(target: Screen) -> Self {
        Self {
            target,
            options: NavOptions::default(),
        }
    }

    pub fn with_options(target: Screen, options: NavOptions) -> Self {
        Self { target, options }
    }
}

/// Bounded back stack. `current` is the visible screen, `history` holds
/// the screens beneath it (oldest first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavStack {
    history: Vec<Screen>,
    current: Screen,
    limit: usize,
}

impl NavStack {
    pub const DEFAULT_LIMIT: usize = 16;

    /// Creates a stack holding only `start`. A `limit` of zero is treated as one.
    pub fn new(start: Screen, limit: usize) -> Self {
        Self {
            history: Vec::new(),
            current: start,
            limit: limit.max(1),
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Screens below the current one, oldest first.
    pub fn history(&self) -> &[Screen] {
        &self.history
    }

    /// All entries, oldest first, ending with the current screen.
    pub fn entries(&self) -> Vec<Screen> {
        let mut entries = self.history.clone();
        entries.push(self.current);
        entries
    }

    pub fn depth(&self) -> usize {
        self.history.len() + 1
    }

    pub fn contains(&self, screen: Screen) -> bool {
        self.current == screen || self.history.contains(&screen)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Drops all history and shows `start`.
    pub fn reset(&mut self, start: Screen) {
        self.history.clear();
        self.current = start;
    }

    /// Applies `request` and returns whether the stack changed.
    ///
    /// A pop-up-to marker that is not on the stack leaves history untouched,
    /// unless `clear_all_if_missing` is set. Past the limit, the oldest entry
    /// above the root is dropped.
    pub fn navigate(&mut self, request: NavRequest) -> bool {
        let before = self.clone();
        let mut entries = self.entries();

        if let Some(pop) = request.options.pop_up_to {
            match entries.iter().rposition(|s| *s == pop.screen) {
                Some(pos) => {
                    let keep = if pop.inclusive { pos } else { pos + 1 };
                    entries.truncate(keep);
                }
                None if request.options.clear_all_if_missing => entries.clear(),
                None => {}
            }
        }

        let on_top = entries.last() == Some(&request.target);
        if !(request.options.single_top && on_top) {
            entries.push(request.target);
        }

        if entries.len() > self.limit {
            let overflow = entries.len() - self.limit;
            // the root stays so clearing back to it keeps working
            if self.limit > 1 {
                entries.drain(1..=overflow);
            } else {
                entries.drain(..overflow);
            }
        }

        // Truncation can only remove entries; the push above guarantees one
        // entry unless single-top matched an existing top.
        if let Some(top) = entries.pop() {
            self.current = top;
            self.history = entries;
        }

        *self != before
    }

    /// Pops the current screen. Returns the new current screen, or `None`
    /// when there is nothing to go back to.
    pub fn back(&mut self) -> Option<Screen> {
        let previous = self.history.pop()?;
        self.current = previous;
        Some(previous)
    }
}

impl Default for NavStack {
    fn default() -> Self {
        Self::new(Screen::Splash, Self::DEFAULT_LIMIT)
    }
}

/// User-triggered actions that appear in the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// Splash "Login" button.
    TapLogin,
    /// Splash "Sign Up" button.
    TapSignUp,
    /// Login options "Continue with Email".
    ContinueWithEmail,
    /// Login options "Sign Up" link.
    TapSignUpLink,
    /// Form bottom link switching between sign in and sign up.
    SwitchMode,
    /// Profile "Logout".
    Logout,
}

impl UserAction {
    pub const ALL: [UserAction; 6] = [
        UserAction::TapLogin,
        UserAction::TapSignUp,
        UserAction::ContinueWithEmail,
        UserAction::TapSignUpLink,
        UserAction::SwitchMode,
        UserAction::Logout,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UserAction::TapLogin => "tap \"Login\"",
            UserAction::TapSignUp => "tap \"Sign Up\"",
            UserAction::ContinueWithEmail => "tap \"Continue with Email\"",
            UserAction::TapSignUpLink => "tap \"Sign Up\" link",
            UserAction::SwitchMode => "tap \"switch\" link",
            UserAction::Logout => "tap \"Logout\"",
        }
    }
}

/// User-triggered edges of the transition table.
///
/// Returns `None` when `action` has no edge from `from`. The asynchronous
/// edge (form → Profile on successful auth) lives in `auth_success_request`.
pub fn transition(from: Screen, action: UserAction) -> Option<NavRequest> {
    match (from, action) {
        (Screen::Splash, UserAction::TapLogin) => Some(NavRequest::push(Screen::LoginOptions)),
        (Screen::Splash, UserAction::TapSignUp)
        | (Screen::LoginOptions, UserAction::TapSignUpLink)
        | (Screen::SignIn, UserAction::SwitchMode) => Some(NavRequest::push(Screen::SignUp)),
        (Screen::LoginOptions, UserAction::ContinueWithEmail)
        | (Screen::SignUp, UserAction::SwitchMode) => Some(NavRequest::push(Screen::SignIn)),
        (Screen::Profile, UserAction::Logout) => Some(logout_request()),
        _ => None,
    }
}

/// Navigation applied when authentication succeeds on a form screen.
pub fn auth_success_request() -> NavRequest {
    NavRequest::with_options(
        Screen::Profile,
        NavOptions::clear_to(Screen::Splash)
            .single_top()
            .clear_all_if_missing(),
    )
}

/// Navigation applied on logout.
pub fn logout_request() -> NavRequest {
    NavRequest::with_options(
        Screen::Splash,
        NavOptions::clear_to(Screen::Profile).clear_all_if_missing(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(stack: &mut NavStack, screens: &[Screen]) {
        for screen in screens {
            stack.navigate(NavRequest::push(*screen));
        }
    }

    #[test]
    fn test_new_stack_starts_on_splash() {
        let stack = NavStack::default();
        assert_eq!(stack.current(), Screen::Splash);
        assert!(stack.history().is_empty());
        assert!(!stack.can_go_back());
    }

    #[test]
    fn test_push_and_back() {
        let mut stack = NavStack::default();
        walk(&mut stack, &[Screen::LoginOptions, Screen::SignIn]);

        assert_eq!(stack.current(), Screen::SignIn);
        assert_eq!(stack.back(), Some(Screen::LoginOptions));
        assert_eq!(stack.back(), Some(Screen::Splash));
        assert_eq!(stack.back(), None);
        assert_eq!(stack.current(), Screen::Splash);
    }

    #[test]
    fn test_auth_success_clears_history_to_splash() {
        let mut stack = NavStack::default();
        walk(&mut stack, &[Screen::LoginOptions, Screen::SignIn, Screen::SignUp]);

        assert!(stack.navigate(auth_success_request()));

        assert_eq!(stack.current(), Screen::Profile);
        assert!(stack.history().is_empty());
        assert!(!stack.contains(Screen::Splash));
    }

    #[test]
    fn test_logout_clears_profile() {
        let mut stack = NavStack::default();
        walk(&mut stack, &[Screen::SignUp]);
        stack.navigate(auth_success_request());

        stack.navigate(logout_request());

        assert_eq!(stack.entries(), vec![Screen::Splash]);
        assert_eq!(stack.back(), None);
    }

    #[test]
    fn test_pop_up_to_non_inclusive_keeps_marker() {
        let mut stack = NavStack::default();
        walk(&mut stack, &[Screen::LoginOptions, Screen::SignIn]);

        let options = NavOptions {
            pop_up_to: Some(PopUpTo {
                screen: Screen::LoginOptions,
                inclusive: false,
            }),
            ..NavOptions::default()
        };
        stack.navigate(NavRequest::with_options(Screen::SignUp, options));

        assert_eq!(
            stack.entries(),
            vec![Screen::Splash, Screen::LoginOptions, Screen::SignUp]
        );
    }

    #[test]
    fn test_missing_marker_leaves_history() {
        let mut stack = NavStack::default();
        walk(&mut stack, &[Screen::LoginOptions]);

        stack.navigate(NavRequest::with_options(
            Screen::SignIn,
            NavOptions::clear_to(Screen::Profile),
        ));

        assert_eq!(
            stack.entries(),
            vec![Screen::Splash, Screen::LoginOptions, Screen::SignIn]
        );
    }

    #[test]
    fn test_marker_uses_newest_occurrence() {
        let mut stack = NavStack::default();
        walk(
            &mut stack,
            &[Screen::SignIn, Screen::SignUp, Screen::SignIn, Screen::SignUp],
        );

        stack.navigate(NavRequest::with_options(
            Screen::Profile,
            NavOptions::clear_to(Screen::SignIn),
        ));

        assert_eq!(
            stack.entries(),
            vec![Screen::Splash, Screen::SignIn, Screen::SignUp, Screen::Profile]
        );
    }

    #[test]
    fn test_single_top_does_not_duplicate() {
        let mut stack = NavStack::default();
        walk(&mut stack, &[Screen::SignIn]);
        stack.navigate(auth_success_request());

        let changed = stack.navigate(auth_success_request());

        assert!(!changed);
        assert_eq!(stack.entries(), vec![Screen::Profile]);
    }

    #[test]
    fn test_limit_drops_oldest_above_root() {
        let mut stack = NavStack::new(Screen::Splash, 3);
        walk(
            &mut stack,
            &[Screen::LoginOptions, Screen::SignIn, Screen::SignUp],
        );

        assert_eq!(stack.depth(), 3);
        assert_eq!(
            stack.entries(),
            vec![Screen::Splash, Screen::SignIn, Screen::SignUp]
        );
    }

    #[test]
    fn test_auth_success_at_limit_clears_all_history() {
        let mut stack = NavStack::default();
        walk(&mut stack, &[Screen::LoginOptions, Screen::SignIn]);
        for _ in 0..2 * NavStack::DEFAULT_LIMIT {
            let next = if stack.current() == Screen::SignIn {
                Screen::SignUp
            } else {
                Screen::SignIn
            };
            stack.navigate(NavRequest::push(next));
        }
        assert_eq!(stack.depth(), NavStack::DEFAULT_LIMIT);

        stack.navigate(auth_success_request());

        assert_eq!(stack.entries(), vec![Screen::Profile]);
        assert_eq!(stack.back(), None);
    }

    #[test]
    fn test_auth_success_without_splash_still_clears() {
        let mut stack = NavStack::new(Screen::SignIn, NavStack::DEFAULT_LIMIT);
        walk(&mut stack, &[Screen::SignUp]);

        stack.navigate(auth_success_request());

        assert_eq!(stack.entries(), vec![Screen::Profile]);
    }

    #[test]
    fn test_zero_limit_still_holds_current() {
        let mut stack = NavStack::new(Screen::Splash, 0);
        walk(&mut stack, &[Screen::LoginOptions]);

        assert_eq!(stack.entries(), vec![Screen::LoginOptions]);
    }

    #[test]
    fn test_transition_table_edges() {
        let cases = [
            (Screen::Splash, UserAction::TapLogin, Screen::LoginOptions),
            (Screen::Splash, UserAction::TapSignUp, Screen::SignUp),
            (Screen::LoginOptions, UserAction::ContinueWithEmail, Screen::SignIn),
            (Screen::LoginOptions, UserAction::TapSignUpLink, Screen::SignUp),
            (Screen::SignIn, UserAction::SwitchMode, Screen::SignUp),
            (Screen::SignUp, UserAction::SwitchMode, Screen::SignIn),
            (Screen::Profile, UserAction::Logout, Screen::Splash),
        ];
        for (from, action, to) in cases {
            let request = transition(from, action)
                .unwrap_or_else(|| panic!("missing edge {from} --{action:?}-->"));
            assert_eq!(request.target, to, "{from} --{action:?}-->");
        }
    }

    #[test]
    fn test_transition_rejects_unknown_edges() {
        assert_eq!(transition(Screen::Splash, UserAction::Logout), None);
        assert_eq!(transition(Screen::Profile, UserAction::TapLogin), None);
        assert_eq!(transition(Screen::LoginOptions, UserAction::SwitchMode), None);
    }

    #[test]
    fn test_screen_parses_routes() {
        assert_eq!("login-options".parse::<Screen>(), Ok(Screen::LoginOptions));
        assert_eq!("Profile".parse::<Screen>(), Ok(Screen::Profile));
        assert!("home".parse::<Screen>().is_err());
    }

    #[test]
    fn test_auth_mode_labels() {
        assert_eq!(AuthMode::SignUp.primary_label(), "Create Account");
        assert_eq!(AuthMode::SignIn.switch_link(), "Sign Up");
        assert!(AuthMode::SignUp.has_confirm_field());
        assert_eq!(Screen::SignUp.auth_mode(), Some(AuthMode::SignUp));
        assert_eq!(Screen::Profile.auth_mode(), None);
    }
}
