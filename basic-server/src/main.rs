use std::sync::Arc;
use std::{env, path};

use campus::error::{CaResult, Error};
use campus_entitlement_adapter_sqlite::{EntitlementAdapterSqlite, UserAdapterSqlite};

pub struct Config {
	pub db_dir: path::PathBuf,
	pub listen: Box<str>,
	pub jwt_secret: Box<str>,
}

impl Config {
	fn from_env() -> CaResult<Config> {
		let jwt_secret = env::var("JWT_SECRET")
			.map_err(|_| Error::Internal("JWT_SECRET is not set".into()))?;

		Ok(Config {
			db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or("./data".to_string())),
			listen: env::var("LISTEN").unwrap_or("127.0.0.1:3000".to_string()).into(),
			jwt_secret: jwt_secret.into(),
		})
	}
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> CaResult<()> {
	let config = Config::from_env()?;
	tokio::fs::create_dir_all(&config.db_dir).await?;

	// Both adapters share one pool over the same database file
	let entitlement_adapter =
		Arc::new(EntitlementAdapterSqlite::new(config.db_dir.join("campus.db")).await?);
	let user_adapter = Arc::new(UserAdapterSqlite::with_pool(entitlement_adapter.pool()));

	campus::run(campus::CampusOpts {
		opts: campus::BuilderOpts {
			listen: config.listen,
			jwt_secret: config.jwt_secret,
			..campus::BuilderOpts::default()
		},
		entitlement_adapter,
		user_adapter,
	})
	.await
}

// vim: ts=4
