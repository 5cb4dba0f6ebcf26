//! Adapter that stores subscription plans, plan bindings, and per-user
//! permission overrides.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::error::{CaResult, Error};
use crate::types::Timestamp;

/// Permission code granting access to a single course.
///
/// Course access is expressed through the same permission-code vocabulary as
/// any other capability: `"course:view:" + course_id`.
pub const COURSE_VIEW_PREFIX: &str = "course:view:";

/// Builds the derived permission code for a course id.
pub fn course_view_code(course_id: &str) -> Box<str> {
	format!("{}{}", COURSE_VIEW_PREFIX, course_id).into()
}

/// A subscription row whose status is ACTIVE and whose time window contains
/// the evaluation instant (inclusive bounds). Created and expired by the
/// external subscription lifecycle; the aggregator only ever reads these.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSubscription {
	pub plan_id: Box<str>,
	pub start_at: Timestamp,
	pub end_at: Timestamp,
}

/// Many-to-many binding from a subscription plan to a course.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCourseBinding {
	pub plan_id: Box<str>,
	pub course_id: Box<str>,
}

/// Many-to-many binding from a subscription plan to a UI menu key.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMenuBinding {
	pub plan_id: Box<str>,
	pub menu_key: Box<str>,
}

/// Many-to-many binding from a subscription plan to a permission code.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPermissionBinding {
	pub plan_id: Box<str>,
	pub permission_code: Box<str>,
}

// OverrideOp //
//************//
/// Per-user override operation.
///
/// A closed two-variant enum: unrecognized op strings are rejected at the
/// data-source boundary, never carried into aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverrideOp {
	Grant,
	Revoke,
}

impl OverrideOp {
	/// Parses an op string case-insensitively ("grant"/"GRANT"/...).
	pub fn parse(op: &str) -> CaResult<OverrideOp> {
		if op.eq_ignore_ascii_case("GRANT") {
			Ok(OverrideOp::Grant)
		} else if op.eq_ignore_ascii_case("REVOKE") {
			Ok(OverrideOp::Revoke)
		} else {
			Err(Error::ValidationError(format!("unknown override op: {}", op)))
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			OverrideOp::Grant => "GRANT",
			OverrideOp::Revoke => "REVOKE",
		}
	}
}

/// Per-user exception layered on top of plan-derived permissions.
///
/// Multiple overrides for the same `(user, code)` may exist; they are applied
/// in data-source return order, so the last conflicting one wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionOverride {
	pub permission_code: Box<str>,
	pub op: OverrideOp,
}

/// A Campus entitlement adapter
///
/// Every `EntitlementAdapter` implementation is required to implement this
/// trait. It is responsible for storing subscriptions, plan bindings, and
/// user-level permission overrides. All read methods are point-in-time
/// lookups; the aggregator performs no writes.
#[async_trait]
pub trait EntitlementAdapter: Debug + Send + Sync {
	/// Lists subscriptions of `user_id` that are active at `now`:
	/// `status == ACTIVE` and `start_at <= now <= end_at` (inclusive).
	async fn list_active_subscriptions(
		&self,
		user_id: &str,
		now: Timestamp,
	) -> CaResult<Vec<ActiveSubscription>>;

	/// Lists plan→course bindings for the given plans.
	/// An empty `plan_ids` slice must yield no rows, never "all plans".
	async fn list_plan_courses(&self, plan_ids: &[Box<str>]) -> CaResult<Vec<PlanCourseBinding>>;

	/// Lists plan→menu bindings for the given plans.
	async fn list_plan_menus(&self, plan_ids: &[Box<str>]) -> CaResult<Vec<PlanMenuBinding>>;

	/// Lists plan→permission bindings for the given plans.
	async fn list_plan_permissions(
		&self,
		plan_ids: &[Box<str>],
	) -> CaResult<Vec<PlanPermissionBinding>>;

	/// Lists all overrides for a user, independent of subscription status,
	/// in a deterministic order (insertion order for the SQLite adapter).
	async fn list_overrides(&self, user_id: &str) -> CaResult<Vec<PermissionOverride>>;

	// Admin writes
	//**************
	// Full-replace semantics: the submitted list replaces all prior bindings
	// for the plan in one transaction; an empty list clears them.

	async fn update_plan_courses(&self, plan_id: &str, course_ids: &[&str]) -> CaResult<()>;
	async fn update_plan_menus(&self, plan_id: &str, menu_keys: &[&str]) -> CaResult<()>;
	async fn update_plan_permissions(&self, plan_id: &str, codes: &[&str]) -> CaResult<()>;

	/// Appends an override for a user.
	async fn create_override(
		&self,
		user_id: &str,
		code: &str,
		op: OverrideOp,
	) -> CaResult<()>;

	/// Deletes all overrides for `(user_id, code)`. Returns the number of
	/// rows removed.
	async fn delete_overrides(&self, user_id: &str, code: &str) -> CaResult<u32>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_override_op_parse() {
		assert_eq!(OverrideOp::parse("GRANT").ok(), Some(OverrideOp::Grant));
		assert_eq!(OverrideOp::parse("revoke").ok(), Some(OverrideOp::Revoke));
		assert_eq!(OverrideOp::parse("Grant").ok(), Some(OverrideOp::Grant));
		assert!(OverrideOp::parse("DENY").is_err());
		assert!(OverrideOp::parse("").is_err());
	}

	#[test]
	fn test_course_view_code() {
		assert_eq!(course_view_code("c-42").as_ref(), "course:view:c-42");
	}
}

// vim: ts=4
