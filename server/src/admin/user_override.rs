//! Per-user override administration

use axum::{
	Json,
	extract::{Path, State},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use campus_types::entitlement_adapter::OverrideOp;

/// # POST /api/admin/user/{user_id}/override
///
/// The op string is validated here at the boundary; unrecognized values are
/// rejected with a validation error, never stored.
#[derive(Deserialize)]
pub struct CreateOverrideReq {
	#[serde(rename = "permissionCode")]
	permission_code: String,
	op: String,
}

pub async fn post_override(
	State(app): State<App>,
	Path(user_id): Path<String>,
	Json(req): Json<CreateOverrideReq>,
) -> CaResult<StatusCode> {
	let op = OverrideOp::parse(&req.op)?;
	app.entitlement_adapter.create_override(&user_id, &req.permission_code, op).await?;
	info!(user_id = %user_id, code = %req.permission_code, op = op.as_str(), "Override created");
	Ok(StatusCode::CREATED)
}

#[derive(Serialize)]
pub struct DeleteOverrideRes {
	removed: u32,
}

/// # DELETE /api/admin/user/{user_id}/override/{code}
pub async fn delete_override(
	State(app): State<App>,
	Path((user_id, code)): Path<(String, String)>,
) -> CaResult<Json<DeleteOverrideRes>> {
	let removed = app.entitlement_adapter.delete_overrides(&user_id, &code).await?;
	info!(user_id = %user_id, code = %code, removed = removed, "Overrides deleted");
	Ok(Json(DeleteOverrideRes { removed }))
}

// vim: ts=4
