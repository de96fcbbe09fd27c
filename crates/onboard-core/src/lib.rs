//! Core domain for onboard: screens and navigation history, authentication
//! state and the auth collaborator contract, configuration, and logging.

pub mod auth;
pub mod config;
pub mod logging;
pub mod navigation;
