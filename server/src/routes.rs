use axum::{
	Router, middleware,
	routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{admin, auth, entitlement};
use campus_core::app::App;
use campus_core::middleware::require_auth;
use campus_entitlement::{MatchMode, require_permissions};

/// Permission required for all admin routes
const ADMIN_CODES: &[&str] = &["admin:plans"];

const REPORT_CODES: &[&str] = &["reports:view"];

pub fn init(state: App) -> Router {
	let admin_router = Router::new()
		.route(
			"/api/admin/plan/{plan_id}/courses",
			get(admin::plan::get_courses).put(admin::plan::put_courses),
		)
		.route(
			"/api/admin/plan/{plan_id}/menus",
			get(admin::plan::get_menus).put(admin::plan::put_menus),
		)
		.route(
			"/api/admin/plan/{plan_id}/permissions",
			get(admin::plan::get_permissions).put(admin::plan::put_permissions),
		)
		.route("/api/admin/user/{user_id}/override", post(admin::user_override::post_override))
		.route(
			"/api/admin/user/{user_id}/override/{code}",
			delete(admin::user_override::delete_override),
		)
		.route_layer(middleware::from_fn_with_state(
			state.clone(),
			require_permissions(ADMIN_CODES, MatchMode::All),
		));

	let report_router = Router::new()
		.route("/api/report", get(entitlement::handler::get_report))
		.route_layer(middleware::from_fn_with_state(
			state.clone(),
			require_permissions(REPORT_CODES, MatchMode::All),
		));

	let protected_router = Router::new()
		.route("/api/me/entitlements", get(entitlement::handler::get_my_entitlements))
		.route("/api/me/menus", get(entitlement::handler::get_my_menus))
		.route("/api/course/{course_id}/access", get(entitlement::handler::get_course_access))
		.merge(admin_router)
		.merge(report_router)
		.route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

	let public_router = Router::new().route("/api/auth/login", post(auth::handler::post_login));

	Router::new()
		.merge(public_router)
		.merge(protected_router)
		.layer(CorsLayer::permissive())
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

// vim: ts=4
