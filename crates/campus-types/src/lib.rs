//! Shared types, adapter traits, and core utilities for the Campus platform.
//!
//! This crate contains the foundational types that are shared between the
//! server crate and all adapter implementations. Extracting these into a
//! separate crate allows adapter crates to compile in parallel with the
//! server's feature modules.

pub mod entitlement_adapter;
pub mod error;
pub mod extract;
pub mod prelude;
pub mod types;
pub mod user_adapter;

// vim: ts=4
