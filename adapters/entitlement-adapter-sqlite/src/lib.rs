//! SQLite implementation of the Campus entitlement and user adapters.
//!
//! Both adapters share one pool over the same database file so subscription,
//! binding, override, user, and ownership rows live together.

use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use async_trait::async_trait;

use campus::entitlement_adapter::{
	ActiveSubscription, EntitlementAdapter, OverrideOp, PermissionOverride, PlanCourseBinding,
	PlanMenuBinding, PlanPermissionBinding,
};
use campus::prelude::*;
use campus::user_adapter::{AuthLogin, User, UserAdapter};

mod binding;
mod overrides;
mod schema;
mod subscription;
mod user;
mod utils;

async fn open_pool(path: impl AsRef<Path>) -> CaResult<SqlitePool> {
	let opts = sqlite::SqliteConnectOptions::new()
		.filename(path.as_ref())
		.create_if_missing(true)
		.journal_mode(sqlite::SqliteJournalMode::Wal);
	let db = sqlite::SqlitePoolOptions::new()
		.max_connections(5)
		.connect_with(opts)
		.await
		.inspect_err(|err| warn!("DB open: {:#?}", err))
		.or(Err(Error::DbError))?;

	schema::init_db(&db).await.inspect_err(|err| warn!("DB init: {:#?}", err)).or(Err(Error::DbError))?;

	Ok(db)
}

// EntitlementAdapterSqlite //
//**************************//
#[derive(Debug)]
pub struct EntitlementAdapterSqlite {
	db: SqlitePool,
}

impl EntitlementAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> CaResult<Self> {
		Ok(Self { db: open_pool(path).await? })
	}

	/// Builds an adapter on an already opened pool, sharing it with a
	/// `UserAdapterSqlite`.
	pub fn with_pool(db: SqlitePool) -> Self {
		Self { db }
	}

	pub fn pool(&self) -> SqlitePool {
		self.db.clone()
	}
}

#[async_trait]
impl EntitlementAdapter for EntitlementAdapterSqlite {
	async fn list_active_subscriptions(
		&self,
		user_id: &str,
		now: Timestamp,
	) -> CaResult<Vec<ActiveSubscription>> {
		subscription::list_active(&self.db, user_id, now).await
	}

	async fn list_plan_courses(&self, plan_ids: &[Box<str>]) -> CaResult<Vec<PlanCourseBinding>> {
		binding::list_courses(&self.db, plan_ids).await
	}

	async fn list_plan_menus(&self, plan_ids: &[Box<str>]) -> CaResult<Vec<PlanMenuBinding>> {
		binding::list_menus(&self.db, plan_ids).await
	}

	async fn list_plan_permissions(
		&self,
		plan_ids: &[Box<str>],
	) -> CaResult<Vec<PlanPermissionBinding>> {
		binding::list_permissions(&self.db, plan_ids).await
	}

	async fn list_overrides(&self, user_id: &str) -> CaResult<Vec<PermissionOverride>> {
		overrides::list(&self.db, user_id).await
	}

	async fn update_plan_courses(&self, plan_id: &str, course_ids: &[&str]) -> CaResult<()> {
		binding::replace(&self.db, "plan_courses", "course_id", plan_id, course_ids).await
	}

	async fn update_plan_menus(&self, plan_id: &str, menu_keys: &[&str]) -> CaResult<()> {
		binding::replace(&self.db, "plan_menus", "menu_key", plan_id, menu_keys).await
	}

	async fn update_plan_permissions(&self, plan_id: &str, codes: &[&str]) -> CaResult<()> {
		binding::replace(&self.db, "plan_permissions", "permission_code", plan_id, codes).await
	}

	async fn create_override(&self, user_id: &str, code: &str, op: OverrideOp) -> CaResult<()> {
		overrides::create(&self.db, user_id, code, op).await
	}

	async fn delete_overrides(&self, user_id: &str, code: &str) -> CaResult<u32> {
		overrides::delete(&self.db, user_id, code).await
	}
}

// UserAdapterSqlite //
//*******************//
#[derive(Debug)]
pub struct UserAdapterSqlite {
	db: SqlitePool,
}

impl UserAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> CaResult<Self> {
		Ok(Self { db: open_pool(path).await? })
	}

	pub fn with_pool(db: SqlitePool) -> Self {
		Self { db }
	}
}

#[async_trait]
impl UserAdapter for UserAdapterSqlite {
	async fn read_user(&self, user_id: &str) -> CaResult<User> {
		user::read(&self.db, user_id).await
	}

	async fn check_password(&self, user_id: &str, password: &str) -> CaResult<AuthLogin> {
		user::check_password(&self.db, user_id, password).await
	}

	async fn list_owned_courses(&self, user_id: &str) -> CaResult<Vec<Box<str>>> {
		user::list_owned_courses(&self.db, user_id).await
	}
}

// vim: ts=4
