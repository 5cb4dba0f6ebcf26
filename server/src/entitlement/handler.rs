//! Entitlement read handlers
//!
//! Every handler recomputes a fresh snapshot; a result is never shared
//! across requests.

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::Serialize;

use crate::prelude::*;
use campus_entitlement::{Entitlements, MatchMode, aggregate, check};
use campus_types::entitlement_adapter::course_view_code;
use campus_types::extract::Auth;

async fn snapshot(app: &App, user_id: &str) -> CaResult<Entitlements> {
	aggregate(app.entitlement_adapter.as_ref(), app.user_adapter.as_ref(), user_id).await
}

/// # GET /api/me/entitlements
pub async fn get_my_entitlements(
	State(app): State<App>,
	Auth(auth): Auth,
) -> CaResult<Json<Entitlements>> {
	Ok(Json(snapshot(&app, &auth.user_id).await?))
}

#[derive(Serialize)]
pub struct Menus {
	#[serde(rename = "menuKeys")]
	menu_keys: Vec<String>,
}

/// # GET /api/me/menus
///
/// Visible menu keys only, for clients that render navigation without
/// needing the full snapshot.
pub async fn get_my_menus(State(app): State<App>, Auth(auth): Auth) -> CaResult<Json<Menus>> {
	let entitlements = snapshot(&app, &auth.user_id).await?;
	let menu_keys = entitlements.menu_keys.iter().map(|k| k.to_string()).collect();
	Ok(Json(Menus { menu_keys }))
}

#[derive(Serialize)]
pub struct Report {
	#[serde(rename = "generatedAt")]
	generated_at: Timestamp,
}

/// # GET /api/report
///
/// Statically gated behind `reports:view`; the guard middleware has already
/// run by the time this handler executes.
pub async fn get_report() -> CaResult<Json<Report>> {
	Ok(Json(Report { generated_at: Timestamp::now() }))
}

/// # GET /api/course/{course_id}/access
///
/// Gate on the derived per-course permission code. Succeeds with no content
/// when the caller may view the course.
pub async fn get_course_access(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(course_id): Path<String>,
) -> CaResult<StatusCode> {
	let code = course_view_code(&course_id);
	check(
		app.entitlement_adapter.as_ref(),
		app.user_adapter.as_ref(),
		&auth.user_id,
		&[&code],
		MatchMode::All,
	)
	.await?;

	Ok(StatusCode::NO_CONTENT)
}

// vim: ts=4
