//! Auth feature slice: the published auth state and the bridge that turns
//! form submissions into collaborator calls.

mod state;
mod update;

pub use state::AuthStore;
pub use update::{handle_auth_completed, submit, submit_sign_in, submit_sign_out, submit_sign_up};
