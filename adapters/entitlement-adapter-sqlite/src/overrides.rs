//! Per-user permission override storage
//!
//! Rows are returned in insertion order (`override_id` ascending) so that
//! conflicting duplicates for the same code resolve deterministically:
//! the last one wins during aggregation.

use sqlx::{Row, SqlitePool};

use crate::utils::db_err;
use campus::entitlement_adapter::{OverrideOp, PermissionOverride};
use campus::prelude::*;

pub(crate) async fn list(db: &SqlitePool, user_id: &str) -> CaResult<Vec<PermissionOverride>> {
	let rows = sqlx::query(
		"SELECT permission_code, op FROM permission_overrides
		WHERE user_id = ?1 ORDER BY override_id",
	)
	.bind(user_id)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	let mut overrides = Vec::with_capacity(rows.len());
	for row in rows {
		let code: Box<str> = row.try_get("permission_code").map_err(db_err)?;
		let op: Box<str> = row.try_get("op").map_err(db_err)?;

		// Unknown ops cannot be represented in OverrideOp. Such rows can
		// only exist if written outside this adapter; skip them loudly.
		match OverrideOp::parse(&op) {
			Ok(op) => overrides.push(PermissionOverride { permission_code: code, op }),
			Err(_) => {
				warn!(user_id = user_id, op = %op, code = %code, "Skipping override with unknown op");
			}
		}
	}
	Ok(overrides)
}

pub(crate) async fn create(
	db: &SqlitePool,
	user_id: &str,
	code: &str,
	op: OverrideOp,
) -> CaResult<()> {
	if code.trim().is_empty() {
		return Err(Error::ValidationError("permission code must not be empty".into()));
	}

	sqlx::query(
		"INSERT INTO permission_overrides (user_id, permission_code, op) VALUES (?1, ?2, ?3)",
	)
	.bind(user_id)
	.bind(code)
	.bind(op.as_str())
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(())
}

pub(crate) async fn delete(db: &SqlitePool, user_id: &str, code: &str) -> CaResult<u32> {
	let res = sqlx::query(
		"DELETE FROM permission_overrides WHERE user_id = ?1 AND permission_code = ?2",
	)
	.bind(user_id)
	.bind(code)
	.execute(db)
	.await
	.map_err(db_err)?;

	Ok(res.rows_affected() as u32)
}

// vim: ts=4
