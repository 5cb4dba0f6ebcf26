//! Custom middlewares

use axum::{
	body::Body,
	extract::State,
	http::{Request, header, response::Response},
	middleware::Next,
};

use crate::prelude::*;
use crate::{Auth, token};

fn bearer_token(req: &Request<Body>) -> Option<&str> {
	req.headers()
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.map(str::trim)
}

/// Rejects the request with `Unauthorized` unless it carries a valid bearer
/// token; on success the caller identity is inserted as an `Auth` extension.
pub async fn require_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> CaResult<Response<Body>> {
	let token = bearer_token(&req).ok_or(Error::Unauthorized)?;
	let ctx = token::validate_access_token(&app.opts.jwt_secret, token)?;

	req.extensions_mut().insert(Auth(ctx));

	Ok(next.run(req).await)
}

/// Like `require_auth`, but lets unauthenticated requests through without an
/// `Auth` extension. Invalid tokens are still rejected.
pub async fn optional_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> CaResult<Response<Body>> {
	if let Some(token) = bearer_token(&req) {
		let ctx = token::validate_access_token(&app.opts.jwt_secret, token)?;
		req.extensions_mut().insert(Auth(ctx));
	}

	Ok(next.run(req).await)
}

// vim: ts=4
