//! Adapter that manages user accounts, credentials, and direct
//! (non-subscription) course ownership.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::error::CaResult;
use crate::types::Timestamp;

/// Context struct for an authenticated user
#[derive(Clone, Debug)]
pub struct AuthCtx {
	pub user_id: Box<str>,
	pub roles: Box<[Box<str>]>,
}

/// A user profile as stored by the user adapter
#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub user_id: Box<str>,
	pub name: Box<str>,
	pub roles: Option<Box<[Box<str>]>>,
	pub created_at: Timestamp,
}

/// Result of a successful credential check
#[derive(Debug)]
pub struct AuthLogin {
	pub user_id: Box<str>,
	pub name: Box<str>,
	pub roles: Option<Box<[Box<str>]>>,
}

/// A Campus user adapter
///
/// Responsible for user accounts and for direct course ownership, which is
/// granted outside the subscription system (one-off purchases, staff grants).
#[async_trait]
pub trait UserAdapter: Debug + Send + Sync {
	/// Reads a user profile
	async fn read_user(&self, user_id: &str) -> CaResult<User>;

	/// Verifies a password. Returns `Error::PermissionDenied` on mismatch.
	async fn check_password(&self, user_id: &str, password: &str) -> CaResult<AuthLogin>;

	/// Lists course ids the user owns directly, independent of any
	/// subscription plan.
	async fn list_owned_courses(&self, user_id: &str) -> CaResult<Vec<Box<str>>>;
}

// vim: ts=4
