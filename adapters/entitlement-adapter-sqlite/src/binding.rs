//! Plan binding reads and full-replace admin writes

use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::utils::db_err;
use campus::entitlement_adapter::{PlanCourseBinding, PlanMenuBinding, PlanPermissionBinding};
use campus::prelude::*;

/// Appends a bound `IN (...)` list to a query
fn push_in<'a>(
	mut query: QueryBuilder<'a, Sqlite>,
	values: &'a [Box<str>],
) -> QueryBuilder<'a, Sqlite> {
	query.push("(");
	for (i, value) in values.iter().enumerate() {
		if i > 0 {
			query.push(", ");
		}
		query.push_bind(value.as_ref());
	}
	query.push(")");
	query
}

async fn list_rows(
	db: &SqlitePool,
	table: &str,
	column: &str,
	plan_ids: &[Box<str>],
) -> CaResult<Vec<(Box<str>, Box<str>)>> {
	// An empty IN-list must yield no rows, not all rows
	if plan_ids.is_empty() {
		return Ok(vec![]);
	}

	let query =
		QueryBuilder::new(format!("SELECT plan_id, {} FROM {} WHERE plan_id IN ", column, table));
	let mut query = push_in(query, plan_ids);

	let rows = query.build().fetch_all(db).await.map_err(db_err)?;

	let mut bindings = Vec::with_capacity(rows.len());
	for row in rows {
		bindings.push((
			row.try_get("plan_id").map_err(db_err)?,
			row.try_get(column).map_err(db_err)?,
		));
	}
	Ok(bindings)
}

pub(crate) async fn list_courses(
	db: &SqlitePool,
	plan_ids: &[Box<str>],
) -> CaResult<Vec<PlanCourseBinding>> {
	Ok(list_rows(db, "plan_courses", "course_id", plan_ids)
		.await?
		.into_iter()
		.map(|(plan_id, course_id)| PlanCourseBinding { plan_id, course_id })
		.collect())
}

pub(crate) async fn list_menus(
	db: &SqlitePool,
	plan_ids: &[Box<str>],
) -> CaResult<Vec<PlanMenuBinding>> {
	Ok(list_rows(db, "plan_menus", "menu_key", plan_ids)
		.await?
		.into_iter()
		.map(|(plan_id, menu_key)| PlanMenuBinding { plan_id, menu_key })
		.collect())
}

pub(crate) async fn list_permissions(
	db: &SqlitePool,
	plan_ids: &[Box<str>],
) -> CaResult<Vec<PlanPermissionBinding>> {
	Ok(list_rows(db, "plan_permissions", "permission_code", plan_ids)
		.await?
		.into_iter()
		.map(|(plan_id, permission_code)| PlanPermissionBinding { plan_id, permission_code })
		.collect())
}

/// Replaces all bindings of a plan with the submitted list in one
/// transaction. An empty list clears the plan's bindings. `table` and
/// `column` are compile-time constants from the adapter, never user input.
pub(crate) async fn replace(
	db: &SqlitePool,
	table: &str,
	column: &str,
	plan_id: &str,
	values: &[&str],
) -> CaResult<()> {
	let mut tx = db.begin().await.map_err(db_err)?;

	sqlx::query(&format!("DELETE FROM {} WHERE plan_id = ?1", table))
		.bind(plan_id)
		.execute(&mut *tx)
		.await
		.map_err(db_err)?;

	for value in values {
		sqlx::query(&format!(
			"INSERT OR IGNORE INTO {} (plan_id, {}) VALUES (?1, ?2)",
			table, column
		))
		.bind(plan_id)
		.bind(value)
		.execute(&mut *tx)
		.await
		.map_err(db_err)?;
	}

	tx.commit().await.map_err(db_err)?;
	Ok(())
}

// vim: ts=4
