//! Database schema initialization and migrations

use sqlx::{Sqlite, SqlitePool, Transaction};

/// Get the current database version from vars table
async fn get_db_version(tx: &mut Transaction<'_, Sqlite>) -> i64 {
	sqlx::query_scalar::<_, String>("SELECT value FROM vars WHERE key = 'db_version'")
		.fetch_optional(&mut **tx)
		.await
		.ok()
		.flatten()
		.and_then(|v| v.parse().ok())
		.unwrap_or(0)
}

/// Set the database version in vars table
async fn set_db_version(tx: &mut Transaction<'_, Sqlite>, version: i64) {
	let _ = sqlx::query("INSERT OR REPLACE INTO vars (key, value) VALUES ('db_version', ?)")
		.bind(version.to_string())
		.execute(&mut **tx)
		.await;
}

// Current schema version - update this when adding new migrations
const CURRENT_DB_VERSION: i64 = 1;

/// Initialize the database schema and run migrations
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Create vars table first (needed for version tracking)
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS vars (
		key text NOT NULL,
		value text NOT NULL,
		created_at INTEGER DEFAULT (unixepoch()),
		updated_at INTEGER DEFAULT (unixepoch()),
		PRIMARY KEY(key)
	)",
	)
	.execute(&mut *tx)
	.await?;

	let version = get_db_version(&mut tx).await;

	// Schema creation - safe to run every time (uses IF NOT EXISTS)

	// Users
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS users (
			user_id text NOT NULL,
			name text,
			password text,
			roles text,
			created_at INTEGER DEFAULT (unixepoch()),
			PRIMARY KEY(user_id)
		)",
	)
	.execute(&mut *tx)
	.await?;

	// Direct (non-subscription) course ownership
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS owned_courses (
			user_id text NOT NULL,
			course_id text NOT NULL,
			created_at INTEGER DEFAULT (unixepoch()),
			PRIMARY KEY(user_id, course_id)
		)",
	)
	.execute(&mut *tx)
	.await?;

	// Subscriptions, written by the external lifecycle. status: A=Active,
	// C=Cancelled, X=Expired
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS subscriptions (
			subscription_id integer PRIMARY KEY AUTOINCREMENT,
			user_id text NOT NULL,
			plan_id text NOT NULL,
			status char(1) NOT NULL DEFAULT 'A',
			start_at integer NOT NULL,
			end_at integer NOT NULL,
			created_at INTEGER DEFAULT (unixepoch())
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_subscriptions_user ON subscriptions (user_id, status)",
	)
	.execute(&mut *tx)
	.await?;

	// Plan bindings (many-to-many)
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS plan_courses (
			plan_id text NOT NULL,
			course_id text NOT NULL,
			PRIMARY KEY(plan_id, course_id)
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS plan_menus (
			plan_id text NOT NULL,
			menu_key text NOT NULL,
			PRIMARY KEY(plan_id, menu_key)
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS plan_permissions (
			plan_id text NOT NULL,
			permission_code text NOT NULL,
			PRIMARY KEY(plan_id, permission_code)
		)",
	)
	.execute(&mut *tx)
	.await?;

	// Per-user overrides. override_id keeps insertion order so conflicting
	// duplicates resolve deterministically (last one wins).
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS permission_overrides (
			override_id integer PRIMARY KEY AUTOINCREMENT,
			user_id text NOT NULL,
			permission_code text NOT NULL,
			op text NOT NULL,
			created_at INTEGER DEFAULT (unixepoch())
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_overrides_user ON permission_overrides (user_id)",
	)
	.execute(&mut *tx)
	.await?;

	if version < CURRENT_DB_VERSION {
		set_db_version(&mut tx, CURRENT_DB_VERSION).await;
	}

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
