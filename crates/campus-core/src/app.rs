//! App state type

use std::sync::Arc;

use campus_types::entitlement_adapter::EntitlementAdapter;
use campus_types::user_adapter::UserAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,

	pub entitlement_adapter: Arc<dyn EntitlementAdapter>,
	pub user_adapter: Arc<dyn UserAdapter>,
}

pub type App = Arc<AppState>;

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// HS256 signing secret for access tokens
	pub jwt_secret: Box<str>,
	/// Access token lifetime in seconds
	pub token_expiry: i64,
}

impl Default for AppBuilderOpts {
	fn default() -> Self {
		AppBuilderOpts {
			listen: "127.0.0.1:3000".into(),
			jwt_secret: "".into(),
			token_expiry: 8 * 3600,
		}
	}
}

// vim: ts=4
