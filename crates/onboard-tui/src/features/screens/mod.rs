//! Screens feature: the interactive elements of each screen, the per-screen
//! UI state (focus, form fields, notices), key handling, and rendering.
//!
//! Every button, field, and link of a screen is listed, in focus order.
//! Elements with no behavior in the flow report themselves unavailable.

mod render;
mod state;
mod update;

use onboard_core::navigation::{AuthMode, Screen, UserAction};
pub use render::render_screen;
pub use state::{FormState, ScreenState};
pub use update::{handle_key, handle_paste};

/// Text inputs on the credential forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    Confirm,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Email => "Email",
            Field::Password => "Password",
            Field::Confirm => "Confirm Password",
        }
    }

    pub fn is_secret(self) -> bool {
        !matches!(self, Field::Email)
    }
}

/// What activating an element does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementAction {
    Navigate(UserAction),
    Submit(AuthMode),
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Field(Field),
    Button {
        label: &'static str,
        action: ElementAction,
    },
    Link {
        prompt: &'static str,
        label: &'static str,
        action: ElementAction,
    },
}

impl Element {
    fn button(label: &'static str, action: ElementAction) -> Self {
        Element::Button { label, action }
    }

    fn unavailable(label: &'static str) -> Self {
        Element::Button {
            label,
            action: ElementAction::Unavailable,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Element::Field(field) => field.label(),
            Element::Button { label, .. } | Element::Link { label, .. } => label,
        }
    }
}

/// Focusable elements of `screen`, in focus order.
pub fn elements(screen: Screen) -> Vec<Element> {
    match screen {
        Screen::Splash => vec![
            Element::button("Login", ElementAction::Navigate(UserAction::TapLogin)),
            Element::button("Sign Up", ElementAction::Navigate(UserAction::TapSignUp)),
        ],
        Screen::LoginOptions => vec![
            Element::button(
                "Continue with Email",
                ElementAction::Navigate(UserAction::ContinueWithEmail),
            ),
            Element::unavailable("Continue with Number"),
            Element::unavailable("Continue with Google"),
            Element::Link {
                prompt: "I am a new user? ",
                label: "Signup",
                action: ElementAction::Navigate(UserAction::TapSignUpLink),
            },
        ],
        Screen::SignIn | Screen::SignUp => form_elements(screen.auth_mode().unwrap_or(AuthMode::SignIn)),
        Screen::Profile => vec![
            Element::unavailable("Notification"),
            Element::unavailable("Calendar"),
            Element::unavailable("Gallery"),
            Element::unavailable("My Playlist"),
            Element::unavailable("Share"),
            Element::button("Logout", ElementAction::Navigate(UserAction::Logout)),
        ],
    }
}

fn form_elements(mode: AuthMode) -> Vec<Element> {
    let mut items = vec![Element::Field(Field::Email), Element::Field(Field::Password)];
    if mode.has_confirm_field() {
        items.push(Element::Field(Field::Confirm));
    } else {
        items.push(Element::unavailable("Forget Password"));
        items.push(Element::unavailable("Forget Number"));
    }
    items.push(Element::button(mode.primary_label(), ElementAction::Submit(mode)));
    items.push(Element::Link {
        prompt: mode.switch_prompt(),
        label: mode.switch_link(),
        action: ElementAction::Navigate(UserAction::SwitchMode),
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_screen_has_elements() {
        for screen in Screen::ALL {
            assert!(!elements(screen).is_empty(), "{screen}");
        }
    }

    #[test]
    fn test_sign_up_has_confirm_and_no_forgot_links() {
        let items = elements(Screen::SignUp);
        assert!(items.contains(&Element::Field(Field::Confirm)));
        assert!(!items.iter().any(|e| e.label() == "Forget Password"));
    }

    #[test]
    fn test_sign_in_primary_submits() {
        let items = elements(Screen::SignIn);
        assert!(items.contains(&Element::Button {
            label: "Sign In",
            action: ElementAction::Submit(AuthMode::SignIn),
        }));
    }

    #[test]
    fn test_navigate_elements_follow_transition_table() {
        use onboard_core::navigation::transition;

        for screen in Screen::ALL {
            for element in elements(screen) {
                let (Element::Button { action, .. } | Element::Link { action, .. }) = element
                else {
                    continue;
                };
                if let ElementAction::Navigate(user_action) = action {
                    assert!(
                        transition(screen, user_action).is_some(),
                        "{screen}: {} has no edge",
                        element.label()
                    );
                }
            }
        }
    }
}
