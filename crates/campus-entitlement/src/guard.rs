//! Authorization guard for protected operations.
//!
//! Explicit middleware composition rather than aspect-style interception: a
//! protected route declares its required permission codes and a match mode,
//! and the guard recomputes the caller's entitlements on every invocation
//! before letting the inner handler run.

use axum::{
	extract::{Request, State},
	middleware::Next,
	response::Response,
};
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use crate::aggregate::aggregate;
use campus_core::{App, Auth};
use campus_types::entitlement_adapter::EntitlementAdapter;
use campus_types::prelude::*;
use campus_types::user_adapter::UserAdapter;

/// How the required permission codes are matched against the caller's set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
	/// Every required code must be present
	All,
	/// At least one required code must be present
	Any,
}

/// Evaluates required codes against a permission set.
///
/// An empty required set vacuously satisfies `All`; callers should treat an
/// empty set as a configuration smell either way.
pub fn satisfies(required: &[&str], mode: MatchMode, permissions: &HashSet<Box<str>>) -> bool {
	match mode {
		MatchMode::All => required.iter().all(|code| permissions.contains(*code)),
		MatchMode::Any => required.iter().any(|code| permissions.contains(*code)),
	}
}

/// Recomputes entitlements for `user_id` and evaluates the requirement.
///
/// Returns `Error::PermissionDenied` when the requirement is not met; any
/// data-source failure propagates unchanged. Used by the middleware below and
/// by handlers that gate on dynamic codes (per-course access).
pub async fn check(
	ent: &dyn EntitlementAdapter,
	user: &dyn UserAdapter,
	user_id: &str,
	required: &[&str],
	mode: MatchMode,
) -> CaResult<()> {
	let entitlements = aggregate(ent, user, user_id).await?;

	if !satisfies(required, mode, &entitlements.permissions) {
		warn!(
			subject = user_id,
			required = ?required,
			mode = ?mode,
			"Permission denied"
		);
		return Err(Error::PermissionDenied);
	}

	Ok(())
}

/// Middleware factory for permission checks on protected routes.
///
/// The `Auth` extractor rejects unauthenticated requests with `Unauthorized`
/// before the inner handler is ever attempted; a failed requirement rejects
/// with `PermissionDenied` and the inner handler is not invoked either.
pub fn require_permissions(
	required: &'static [&'static str],
	mode: MatchMode,
) -> impl Fn(
	State<App>,
	Auth,
	Request,
	Next,
) -> Pin<Box<dyn Future<Output = Result<Response, Error>> + Send>>
       + Clone {
	move |state, auth, req, next| {
		Box::pin(check_route_permission(state, auth, req, next, required, mode))
	}
}

async fn check_route_permission(
	State(app): State<App>,
	Auth(auth_ctx): Auth,
	req: Request,
	next: Next,
	required: &'static [&'static str],
	mode: MatchMode,
) -> Result<Response, Error> {
	check(
		app.entitlement_adapter.as_ref(),
		app.user_adapter.as_ref(),
		&auth_ctx.user_id,
		required,
		mode,
	)
	.await?;

	Ok(next.run(req).await)
}


// vim: ts=4
