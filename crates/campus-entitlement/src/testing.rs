//! In-memory mock adapter shared by the aggregator and guard tests.

use async_trait::async_trait;

use campus_types::entitlement_adapter::{
	ActiveSubscription, EntitlementAdapter, OverrideOp, PermissionOverride, PlanCourseBinding,
	PlanMenuBinding, PlanPermissionBinding,
};
use campus_types::prelude::*;
use campus_types::user_adapter::{AuthLogin, User, UserAdapter};

#[derive(Debug, Default)]
pub struct MockAdapter {
	pub subscriptions: Vec<(Box<str>, ActiveSubscription)>,
	pub plan_courses: Vec<PlanCourseBinding>,
	pub plan_menus: Vec<PlanMenuBinding>,
	pub plan_permissions: Vec<PlanPermissionBinding>,
	pub overrides: Vec<PermissionOverride>,
	pub owned_courses: Vec<Box<str>>,
	/// Makes every plan-derived lookup fail with `DbError`
	pub fail_plan_lookups: bool,
}

impl MockAdapter {
	/// Adds a subscription whose window is `[now + start_delta, now + end_delta]`
	/// in seconds, relative to the time of this call.
	pub fn add_subscription(&mut self, user_id: &str, plan_id: &str, start_delta: i64, end_delta: i64) {
		let now = Timestamp::now().0;
		self.subscriptions.push((
			user_id.into(),
			ActiveSubscription {
				plan_id: plan_id.into(),
				start_at: Timestamp(now + start_delta),
				end_at: Timestamp(now + end_delta),
			},
		));
	}

	fn check_plans(&self) -> CaResult<()> {
		if self.fail_plan_lookups { Err(Error::DbError) } else { Ok(()) }
	}
}

#[async_trait]
impl EntitlementAdapter for MockAdapter {
	async fn list_active_subscriptions(
		&self,
		user_id: &str,
		now: Timestamp,
	) -> CaResult<Vec<ActiveSubscription>> {
		Ok(self
			.subscriptions
			.iter()
			.filter(|(uid, sub)| {
				uid.as_ref() == user_id && sub.start_at <= now && sub.end_at >= now
			})
			.map(|(_, sub)| sub.clone())
			.collect())
	}

	async fn list_plan_courses(&self, plan_ids: &[Box<str>]) -> CaResult<Vec<PlanCourseBinding>> {
		self.check_plans()?;
		Ok(self.plan_courses.iter().filter(|b| plan_ids.contains(&b.plan_id)).cloned().collect())
	}

	async fn list_plan_menus(&self, plan_ids: &[Box<str>]) -> CaResult<Vec<PlanMenuBinding>> {
		self.check_plans()?;
		Ok(self.plan_menus.iter().filter(|b| plan_ids.contains(&b.plan_id)).cloned().collect())
	}

	async fn list_plan_permissions(
		&self,
		plan_ids: &[Box<str>],
	) -> CaResult<Vec<PlanPermissionBinding>> {
		self.check_plans()?;
		Ok(self
			.plan_permissions
			.iter()
			.filter(|b| plan_ids.contains(&b.plan_id))
			.cloned()
			.collect())
	}

	async fn list_overrides(&self, _user_id: &str) -> CaResult<Vec<PermissionOverride>> {
		Ok(self.overrides.clone())
	}

	async fn update_plan_courses(&self, _plan_id: &str, _course_ids: &[&str]) -> CaResult<()> {
		Err(Error::Internal("not supported by mock".into()))
	}

	async fn update_plan_menus(&self, _plan_id: &str, _menu_keys: &[&str]) -> CaResult<()> {
		Err(Error::Internal("not supported by mock".into()))
	}

	async fn update_plan_permissions(&self, _plan_id: &str, _codes: &[&str]) -> CaResult<()> {
		Err(Error::Internal("not supported by mock".into()))
	}

	async fn create_override(&self, _user_id: &str, _code: &str, _op: OverrideOp) -> CaResult<()> {
		Err(Error::Internal("not supported by mock".into()))
	}

	async fn delete_overrides(&self, _user_id: &str, _code: &str) -> CaResult<u32> {
		Err(Error::Internal("not supported by mock".into()))
	}
}

#[async_trait]
impl UserAdapter for MockAdapter {
	async fn read_user(&self, user_id: &str) -> CaResult<User> {
		Ok(User {
			user_id: user_id.into(),
			name: user_id.into(),
			roles: None,
			created_at: Timestamp::now(),
		})
	}

	async fn check_password(&self, _user_id: &str, _password: &str) -> CaResult<AuthLogin> {
		Err(Error::PermissionDenied)
	}

	async fn list_owned_courses(&self, _user_id: &str) -> CaResult<Vec<Box<str>>> {
		Ok(self.owned_courses.clone())
	}
}

// vim: ts=4
