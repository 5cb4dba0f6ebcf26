//! Admin endpoints for plan bindings and user overrides.
//!
//! All routes in this module sit behind the `admin:plans` permission guard.

pub mod plan;
pub mod user_override;

// vim: ts=4
