//! Per-screen UI state.
//!
//! Reset whenever the navigation stack changes, the way a freshly composed
//! destination starts with empty fields.

use onboard_core::auth::Credentials;

use super::Field;

/// Text typed into the credential form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub show_password: bool,
    /// Validation message raised before anything is submitted.
    pub local_error: Option<String>,
}

impl FormState {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::Confirm => &self.confirm,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::Confirm => &mut self.confirm,
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.trim(), self.password.clone())
    }

    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    /// Index into `elements(current screen)`.
    pub focus: usize,
    pub form: FormState,
    /// Transient message, e.g. for elements that do nothing yet.
    pub notice: Option<String>,
    nav_revision: u64,
}

impl ScreenState {
    /// Resets everything when the navigation revision moved on.
    pub fn sync(&mut self, nav_revision: u64) {
        if self.nav_revision != nav_revision {
            *self = Self {
                nav_revision,
                ..Self::default()
            };
        }
    }

    pub fn focus_next(&mut self, len: usize) {
        if len > 0 {
            self.focus = (self.focus + 1) % len;
        }
    }

    pub fn focus_prev(&mut self, len: usize) {
        if len > 0 {
            self.focus = (self.focus + len - 1) % len;
        }
    }
}
