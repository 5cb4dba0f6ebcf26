//! Core infrastructure for the Campus platform.
//!
//! Holds the shared application state (adapter trait objects plus builder
//! options) and the bearer-token auth middleware used by every protected
//! route.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod middleware;
pub mod prelude;
pub mod token;

pub use app::{App, AppBuilderOpts, AppState};
pub use campus_types::extract::{Auth, OptionalAuth};

// vim: ts=4
