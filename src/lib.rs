//! KidsCare client core.
//!
//! Authenticated access to the KidsCare backend for parents and doctors:
//! a keychain-backed session token store, an HTTP client that attaches the
//! stored bearer token to every request and normalizes failures, typed
//! endpoint wrappers, and the view-state and BMI helpers the screens use.

pub mod api;
pub mod bmi;
pub mod commands;
pub mod config;
pub mod session;
pub mod state;
pub mod view;
