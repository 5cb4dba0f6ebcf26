//! Access token generation and validation (HS256 JWT)

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use campus_types::user_adapter::AuthCtx;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthToken<S> {
	pub sub: S,
	pub exp: i64,
	pub r: Option<S>,
}

pub fn generate_access_token(
	secret: &str,
	user_id: &str,
	roles: Option<&str>,
	expiry: i64,
) -> CaResult<Box<str>> {
	let exp = Timestamp::now().0 + expiry;

	let token = encode(
		&jsonwebtoken::Header::new(Algorithm::HS256),
		&AuthToken::<&str> { sub: user_id, exp, r: roles },
		&EncodingKey::from_secret(secret.as_bytes()),
	)
	.map_err(|err| Error::Internal(format!("token signing failed: {}", err)))?;

	Ok(token.into())
}

pub fn validate_access_token(secret: &str, token: &str) -> CaResult<AuthCtx> {
	let token_data = decode::<AuthToken<Box<str>>>(
		token,
		&DecodingKey::from_secret(secret.as_bytes()),
		&Validation::new(Algorithm::HS256),
	)
	.map_err(|_| Error::Unauthorized)?;

	let roles = match token_data.claims.r {
		Some(r) if !r.is_empty() => r.split(',').map(Box::from).collect(),
		_ => Box::from([]),
	};

	Ok(AuthCtx { user_id: token_data.claims.sub, roles })
}


// vim: ts=4
