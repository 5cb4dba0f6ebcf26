//! Entitlement aggregation and authorization guard for the Campus platform.
//!
//! Entitlements are computed on demand from the data sources and never
//! cached: every protected invocation sees the effect of just-changed
//! subscriptions and overrides.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod guard;

pub use aggregate::{Entitlements, aggregate};
pub use guard::{MatchMode, check, require_permissions, satisfies};

#[cfg(test)]
pub(crate) mod testing;

// vim: ts=4
