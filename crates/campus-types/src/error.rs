//! Error taxonomy shared by the server and all adapters.
//!
//! Adapters collapse their backend-specific failures into `DbError` after
//! logging them, so data-source internals never leak to clients.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub type CaResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// No caller identity (maps to 401)
	Unauthorized,
	/// Caller lacks required permissions (maps to 403)
	PermissionDenied,
	NotFound,
	ValidationError(String),
	/// A data-source lookup failed. Details are logged, never exposed.
	DbError,
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::NotFound => write!(f, "not found"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::DbError => write!(f, "data access error"),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let (status, code) = match self {
			Error::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
			Error::PermissionDenied => (StatusCode::FORBIDDEN, "FORBIDDEN"),
			Error::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
			Error::ValidationError(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION"),
			// DbError, Internal, Io: generic failure, no internals exposed
			_ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
		};
		(status, Json(json!({ "error": code }))).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unauthorized_and_forbidden_are_distinct() {
		let unauth = Error::Unauthorized.into_response();
		let forbidden = Error::PermissionDenied.into_response();
		assert_eq!(unauth.status(), StatusCode::UNAUTHORIZED);
		assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
	}

	#[test]
	fn test_db_error_is_generic() {
		let res = Error::DbError.into_response();
		assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}

// vim: ts=4
