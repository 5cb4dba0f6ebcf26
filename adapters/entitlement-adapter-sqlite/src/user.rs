//! User accounts, credentials, and direct course ownership

use sqlx::{Row, SqlitePool};

use crate::utils::{db_err, parse_str_list_optional};
use campus::prelude::*;
use campus::user_adapter::{AuthLogin, User};

pub(crate) async fn read(db: &SqlitePool, user_id: &str) -> CaResult<User> {
	let row = sqlx::query("SELECT user_id, name, roles, created_at FROM users WHERE user_id = ?1")
		.bind(user_id)
		.fetch_one(db)
		.await
		.map_err(db_err)?;

	let roles: Option<String> = row.try_get("roles").map_err(db_err)?;
	Ok(User {
		user_id: row.try_get("user_id").map_err(db_err)?,
		name: row.try_get("name").map_err(db_err)?,
		roles: parse_str_list_optional(roles.as_deref()),
		created_at: row.try_get("created_at").map(Timestamp).map_err(db_err)?,
	})
}

/// Check a user password
///
/// Returns `PermissionDenied` both for unknown users and wrong passwords so
/// login probing cannot distinguish the two.
pub(crate) async fn check_password(
	db: &SqlitePool,
	user_id: &str,
	password: &str,
) -> CaResult<AuthLogin> {
	let row = sqlx::query("SELECT user_id, name, password, roles FROM users WHERE user_id = ?1")
		.bind(user_id)
		.fetch_optional(db)
		.await
		.map_err(db_err)?
		.ok_or(Error::PermissionDenied)?;

	let password_hash: Box<str> = row.try_get("password").map_err(db_err)?;
	if !bcrypt::verify(password, &password_hash).map_err(|_| Error::PermissionDenied)? {
		return Err(Error::PermissionDenied);
	}

	let roles: Option<String> = row.try_get("roles").map_err(db_err)?;
	Ok(AuthLogin {
		user_id: row.try_get("user_id").map_err(db_err)?,
		name: row.try_get("name").map_err(db_err)?,
		roles: parse_str_list_optional(roles.as_deref()),
	})
}

pub(crate) async fn list_owned_courses(db: &SqlitePool, user_id: &str) -> CaResult<Vec<Box<str>>> {
	let rows = sqlx::query("SELECT course_id FROM owned_courses WHERE user_id = ?1")
		.bind(user_id)
		.fetch_all(db)
		.await
		.map_err(db_err)?;

	let mut courses = Vec::with_capacity(rows.len());
	for row in rows {
		courses.push(row.try_get("course_id").map_err(db_err)?);
	}
	Ok(courses)
}

// vim: ts=4
