//! Active subscription lookups
//!
//! Subscription rows are written by the external subscription lifecycle;
//! this module only reads them.

use sqlx::{Row, SqlitePool};

use crate::utils::db_err;
use campus::entitlement_adapter::ActiveSubscription;
use campus::prelude::*;

/// Lists subscriptions of a user that are active at `now`.
///
/// A row qualifies iff `status = 'A'` and `start_at <= now <= end_at`, both
/// bounds inclusive. `now` is passed in by the caller so the whole
/// aggregation evaluates against a single snapshot.
pub(crate) async fn list_active(
	db: &SqlitePool,
	user_id: &str,
	now: Timestamp,
) -> CaResult<Vec<ActiveSubscription>> {
	let rows = sqlx::query(
		"SELECT plan_id, start_at, end_at FROM subscriptions
		WHERE user_id = ?1 AND status = 'A' AND start_at <= ?2 AND end_at >= ?2",
	)
	.bind(user_id)
	.bind(now.0)
	.fetch_all(db)
	.await
	.map_err(db_err)?;

	let mut subscriptions = Vec::with_capacity(rows.len());
	for row in rows {
		subscriptions.push(ActiveSubscription {
			plan_id: row.try_get("plan_id").map_err(db_err)?,
			start_at: row.try_get("start_at").map(Timestamp).map_err(db_err)?,
			end_at: row.try_get("end_at").map(Timestamp).map_err(db_err)?,
		});
	}
	Ok(subscriptions)
}

// vim: ts=4
