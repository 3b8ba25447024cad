//! API client module for KidsCare.
//!
//! Provides the HTTP client with bearer token injection, the normalized
//! request outcome, and typed wrappers for the backend endpoints.

pub mod announcements;
pub mod auth;
pub mod client;
pub mod outcome;
pub mod profiles;
pub mod records;
pub mod request;
pub mod types;

#[cfg(test)]
pub(crate) mod mock_server;

pub use client::{ApiClient, ClientConfig};
pub use outcome::{ApiError, ErrorClass, Outcome, TransportKind};
pub use request::{Method, RequestDescriptor};
