//! Campus is a self-hostable course membership backend.
//!
//! # Features
//!
//! - Entitlement aggregation
//!		- active subscription plans merged with per-user overrides
//!		- course access expressed as `course:view:<id>` permission codes
//!		- computed on demand, never cached
//!	- Authorization guard
//!		- required permission codes with All/Any matching
//!		- explicit middleware composition around protected routes
//!	- Administration
//!		- full-replace plan→course/menu/permission bindings
//!		- per-user grant/revoke overrides
//!	- Pluggable storage adapters (SQLite included)

#![forbid(unsafe_code)]

pub mod admin;
pub mod auth;
pub mod entitlement;
pub mod prelude;
pub mod routes;

use std::sync::Arc;

use crate::prelude::*;
use campus_core::app::{AppBuilderOpts, AppState};
use campus_types::entitlement_adapter::EntitlementAdapter;
use campus_types::user_adapter::UserAdapter;

// Re-export shared types and adapter traits for embedders
pub use campus_core::app::AppBuilderOpts as BuilderOpts;
pub use campus_types::entitlement_adapter;
pub use campus_types::error;
pub use campus_types::extract;
pub use campus_types::types;
pub use campus_types::user_adapter;

pub struct CampusOpts {
	pub opts: AppBuilderOpts,
	pub entitlement_adapter: Arc<dyn EntitlementAdapter>,
	pub user_adapter: Arc<dyn UserAdapter>,
}

/// Builds the shared app state from the configured adapters.
pub fn build_app(opts: CampusOpts) -> App {
	Arc::new(AppState {
		opts: opts.opts,
		entitlement_adapter: opts.entitlement_adapter,
		user_adapter: opts.user_adapter,
	})
}

/// Runs the Campus server until the process is stopped.
pub async fn run(opts: CampusOpts) -> CaResult<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "info".into()),
		)
		.init();

	let app = build_app(opts);
	let router = routes::init(app.clone());

	info!("Listening on {}", app.opts.listen);
	let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
	axum::serve(listener, router).await?;

	Ok(())
}

// vim: ts=4
