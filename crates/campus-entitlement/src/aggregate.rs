//! Point-in-time entitlement aggregation.
//!
//! Combines active subscription plans, direct course ownership, and per-user
//! overrides into a single `Entitlements` snapshot. The computation is
//! stateless and request-scoped: each call reads one consistent "now",
//! performs a bounded sequence of data-source reads, and returns a fresh
//! result. There is no cache and therefore no invalidation.

use serde::Serialize;
use std::collections::HashSet;

use campus_types::entitlement_adapter::{EntitlementAdapter, OverrideOp, course_view_code};
use campus_types::prelude::*;
use campus_types::user_adapter::UserAdapter;

/// The computed entitlement set of one user at one instant.
///
/// Ephemeral: exists for the duration of one aggregation call and is never
/// persisted or shared across requests.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlements {
	pub permissions: HashSet<Box<str>>,
	pub course_ids: HashSet<Box<str>>,
	pub menu_keys: HashSet<Box<str>>,
	pub computed_at: Timestamp,
}

impl Entitlements {
	pub fn has_permission(&self, code: &str) -> bool {
		self.permissions.contains(code)
	}
}

/// Computes the effective entitlements of `user_id`.
///
/// Empty data is not an error: a user with no subscriptions, no owned
/// courses, and no overrides gets empty sets. A failed data-source lookup
/// propagates unchanged; there is no partial or degraded result.
pub async fn aggregate(
	ent: &dyn EntitlementAdapter,
	user: &dyn UserAdapter,
	user_id: &str,
) -> CaResult<Entitlements> {
	// Single "now" snapshot for the whole call, also returned as computed_at
	let now = Timestamp::now();

	let subscriptions = ent.list_active_subscriptions(user_id, now).await?;
	let mut plan_ids: Vec<Box<str>> = Vec::with_capacity(subscriptions.len());
	for sub in subscriptions {
		if !plan_ids.contains(&sub.plan_id) {
			plan_ids.push(sub.plan_id);
		}
	}

	let mut course_ids: HashSet<Box<str>> = HashSet::new();
	let mut menu_keys: HashSet<Box<str>> = HashSet::new();
	let mut permissions: HashSet<Box<str>> = HashSet::new();

	// An IN-query over an empty plan set must not mean "match all", so all
	// plan-derived lookups are skipped when no subscription is active.
	if !plan_ids.is_empty() {
		for binding in ent.list_plan_courses(&plan_ids).await? {
			course_ids.insert(binding.course_id);
		}
		for binding in ent.list_plan_menus(&plan_ids).await? {
			menu_keys.insert(binding.menu_key);
		}
		for binding in ent.list_plan_permissions(&plan_ids).await? {
			permissions.insert(binding.permission_code);
		}
	}

	for course_id in user.list_owned_courses(user_id).await? {
		course_ids.insert(course_id);
	}

	// Course access is expressed through the permission-code vocabulary
	for course_id in &course_ids {
		permissions.insert(course_view_code(course_id));
	}

	// Overrides are independent of subscription status and applied in
	// data-source order: the last conflicting one wins.
	for row in ent.list_overrides(user_id).await? {
		match row.op {
			OverrideOp::Grant => {
				permissions.insert(row.permission_code);
			}
			OverrideOp::Revoke => {
				permissions.remove(&row.permission_code);
			}
		}
	}

	debug!(
		user_id = user_id,
		permissions = permissions.len(),
		courses = course_ids.len(),
		menus = menu_keys.len(),
		"Entitlements computed"
	);

	Ok(Entitlements { permissions, course_ids, menu_keys, computed_at: now })
}


// vim: ts=4
