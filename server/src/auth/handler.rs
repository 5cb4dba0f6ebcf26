//! Login handler issuing access tokens

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::prelude::*;
use campus_core::token::generate_access_token;

/// # POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginReq {
	#[serde(rename = "userId")]
	user_id: String,
	password: String,
}

#[skip_serializing_none]
#[derive(Serialize)]
pub struct Login {
	#[serde(rename = "userId")]
	user_id: String,
	name: String,
	roles: Option<Vec<String>>,
	token: String,
}

pub async fn post_login(
	State(app): State<App>,
	Json(login): Json<LoginReq>,
) -> CaResult<(StatusCode, Json<Login>)> {
	let auth = app.user_adapter.check_password(&login.user_id, &login.password).await;

	let Ok(auth) = auth else {
		// Delay the failure response a little to slow down probing
		tokio::time::sleep(std::time::Duration::from_secs(1)).await;
		return Err(Error::Unauthorized);
	};

	let roles_csv = auth.roles.as_ref().map(|roles| roles.join(","));
	let token = generate_access_token(
		&app.opts.jwt_secret,
		&auth.user_id,
		roles_csv.as_deref(),
		app.opts.token_expiry,
	)?;

	info!(user_id = %auth.user_id, "Login");

	let login = Login {
		user_id: auth.user_id.to_string(),
		name: auth.name.to_string(),
		roles: auth.roles.map(|roles| roles.iter().map(|r| r.to_string()).collect()),
		token: token.to_string(),
	};

	Ok((StatusCode::OK, Json(login)))
}

// vim: ts=4
