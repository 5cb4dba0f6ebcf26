//! Plan binding administration
//!
//! Updates are full-replace: the submitted list replaces all prior bindings
//! for the plan; an empty or absent list clears them.

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(Deserialize, Serialize)]
pub struct BindingList {
	#[serde(default)]
	items: Vec<String>,
}

fn as_refs(items: &[String]) -> Vec<&str> {
	items.iter().map(String::as_str).collect()
}

/// # GET /api/admin/plan/{plan_id}/courses
pub async fn get_courses(
	State(app): State<App>,
	Path(plan_id): Path<String>,
) -> CaResult<Json<BindingList>> {
	let plan_ids = [Box::from(plan_id.as_str())];
	let bindings = app.entitlement_adapter.list_plan_courses(&plan_ids).await?;
	Ok(Json(BindingList { items: bindings.into_iter().map(|b| b.course_id.into()).collect() }))
}

/// # PUT /api/admin/plan/{plan_id}/courses
pub async fn put_courses(
	State(app): State<App>,
	Path(plan_id): Path<String>,
	Json(req): Json<BindingList>,
) -> CaResult<StatusCode> {
	app.entitlement_adapter.update_plan_courses(&plan_id, &as_refs(&req.items)).await?;
	info!(plan_id = %plan_id, count = req.items.len(), "Plan courses replaced");
	Ok(StatusCode::NO_CONTENT)
}

/// # GET /api/admin/plan/{plan_id}/menus
pub async fn get_menus(
	State(app): State<App>,
	Path(plan_id): Path<String>,
) -> CaResult<Json<BindingList>> {
	let plan_ids = [Box::from(plan_id.as_str())];
	let bindings = app.entitlement_adapter.list_plan_menus(&plan_ids).await?;
	Ok(Json(BindingList { items: bindings.into_iter().map(|b| b.menu_key.into()).collect() }))
}

/// # PUT /api/admin/plan/{plan_id}/menus
pub async fn put_menus(
	State(app): State<App>,
	Path(plan_id): Path<String>,
	Json(req): Json<BindingList>,
) -> CaResult<StatusCode> {
	app.entitlement_adapter.update_plan_menus(&plan_id, &as_refs(&req.items)).await?;
	info!(plan_id = %plan_id, count = req.items.len(), "Plan menus replaced");
	Ok(StatusCode::NO_CONTENT)
}

/// # GET /api/admin/plan/{plan_id}/permissions
pub async fn get_permissions(
	State(app): State<App>,
	Path(plan_id): Path<String>,
) -> CaResult<Json<BindingList>> {
	let plan_ids = [Box::from(plan_id.as_str())];
	let bindings = app.entitlement_adapter.list_plan_permissions(&plan_ids).await?;
	Ok(Json(BindingList {
		items: bindings.into_iter().map(|b| b.permission_code.into()).collect(),
	}))
}

/// # PUT /api/admin/plan/{plan_id}/permissions
pub async fn put_permissions(
	State(app): State<App>,
	Path(plan_id): Path<String>,
	Json(req): Json<BindingList>,
) -> CaResult<StatusCode> {
	app.entitlement_adapter.update_plan_permissions(&plan_id, &as_refs(&req.items)).await?;
	info!(plan_id = %plan_id, count = req.items.len(), "Plan permissions replaced");
	Ok(StatusCode::NO_CONTENT)
}

// vim: ts=4
