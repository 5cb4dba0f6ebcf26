//! Router-level tests covering authentication and authorization outcomes.
//!
//! Uses in-memory adapters so the full middleware chain runs without a
//! database.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

use campus::{CampusOpts, build_app, routes};
use campus_core::app::AppBuilderOpts;
use campus_core::token::generate_access_token;
use campus_types::entitlement_adapter::{
	ActiveSubscription, EntitlementAdapter, OverrideOp, PermissionOverride, PlanCourseBinding,
	PlanMenuBinding, PlanPermissionBinding,
};
use campus_types::error::{CaResult, Error};
use campus_types::types::Timestamp;
use campus_types::user_adapter::{AuthLogin, User, UserAdapter};

const SECRET: &str = "test-secret";

#[derive(Debug, Default)]
struct MemoryAdapter {
	subscriptions: Vec<(Box<str>, ActiveSubscription)>,
	plan_permissions: Vec<PlanPermissionBinding>,
	overrides: Vec<(Box<str>, PermissionOverride)>,
	owned_courses: Vec<(Box<str>, Box<str>)>,
}

impl MemoryAdapter {
	fn subscribe(&mut self, user_id: &str, plan_id: &str) {
		let now = Timestamp::now().0;
		self.subscriptions.push((
			user_id.into(),
			ActiveSubscription {
				plan_id: plan_id.into(),
				start_at: Timestamp(now - 100),
				end_at: Timestamp(now + 100),
			},
		));
	}

	fn grant(&mut self, user_id: &str, code: &str) {
		self.overrides.push((
			user_id.into(),
			PermissionOverride { permission_code: code.into(), op: OverrideOp::Grant },
		));
	}
}

#[async_trait]
impl EntitlementAdapter for MemoryAdapter {
	async fn list_active_subscriptions(
		&self,
		user_id: &str,
		now: Timestamp,
	) -> CaResult<Vec<ActiveSubscription>> {
		Ok(self
			.subscriptions
			.iter()
			.filter(|(uid, s)| uid.as_ref() == user_id && s.start_at <= now && s.end_at >= now)
			.map(|(_, s)| s.clone())
			.collect())
	}

	async fn list_plan_courses(&self, _plan_ids: &[Box<str>]) -> CaResult<Vec<PlanCourseBinding>> {
		Ok(vec![])
	}

	async fn list_plan_menus(&self, _plan_ids: &[Box<str>]) -> CaResult<Vec<PlanMenuBinding>> {
		Ok(vec![])
	}

	async fn list_plan_permissions(
		&self,
		plan_ids: &[Box<str>],
	) -> CaResult<Vec<PlanPermissionBinding>> {
		Ok(self
			.plan_permissions
			.iter()
			.filter(|b| plan_ids.contains(&b.plan_id))
			.cloned()
			.collect())
	}

	async fn list_overrides(&self, user_id: &str) -> CaResult<Vec<PermissionOverride>> {
		Ok(self
			.overrides
			.iter()
			.filter(|(uid, _)| uid.as_ref() == user_id)
			.map(|(_, o)| o.clone())
			.collect())
	}

	async fn update_plan_courses(&self, _plan_id: &str, _course_ids: &[&str]) -> CaResult<()> {
		Ok(())
	}

	async fn update_plan_menus(&self, _plan_id: &str, _menu_keys: &[&str]) -> CaResult<()> {
		Ok(())
	}

	async fn update_plan_permissions(&self, _plan_id: &str, _codes: &[&str]) -> CaResult<()> {
		Ok(())
	}

	async fn create_override(&self, _user_id: &str, _code: &str, _op: OverrideOp) -> CaResult<()> {
		Ok(())
	}

	async fn delete_overrides(&self, _user_id: &str, _code: &str) -> CaResult<u32> {
		Ok(0)
	}
}

#[async_trait]
impl UserAdapter for MemoryAdapter {
	async fn read_user(&self, user_id: &str) -> CaResult<User> {
		Ok(User {
			user_id: user_id.into(),
			name: user_id.into(),
			roles: None,
			created_at: Timestamp::now(),
		})
	}

	async fn check_password(&self, user_id: &str, password: &str) -> CaResult<AuthLogin> {
		if password == "secret" {
			Ok(AuthLogin { user_id: user_id.into(), name: user_id.into(), roles: None })
		} else {
			Err(Error::PermissionDenied)
		}
	}

	async fn list_owned_courses(&self, user_id: &str) -> CaResult<Vec<Box<str>>> {
		Ok(self
			.owned_courses
			.iter()
			.filter(|(uid, _)| uid.as_ref() == user_id)
			.map(|(_, c)| c.clone())
			.collect())
	}
}

fn build_router(adapter: MemoryAdapter) -> axum::Router {
	let adapter = Arc::new(adapter);
	let app = build_app(CampusOpts {
		opts: AppBuilderOpts { jwt_secret: SECRET.into(), ..AppBuilderOpts::default() },
		entitlement_adapter: adapter.clone(),
		user_adapter: adapter,
	});
	routes::init(app)
}

fn authed_get(path: &str, user_id: &str) -> Request<Body> {
	let token = generate_access_token(SECRET, user_id, None, 3600).expect("token");
	Request::builder()
		.uri(path)
		.header(header::AUTHORIZATION, format!("Bearer {}", token))
		.body(Body::empty())
		.expect("request")
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
	let router = build_router(MemoryAdapter::default());

	let res = router
		.oneshot(Request::builder().uri("/api/me/entitlements").body(Body::empty()).expect("request"))
		.await
		.expect("response");
	assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_lacking_admin_permission_is_forbidden() {
	// Authenticated but without admin:plans: Forbidden, distinct from 401
	let router = build_router(MemoryAdapter::default());

	let res = router
		.oneshot(authed_get("/api/admin/plan/p1/menus", "alice"))
		.await
		.expect("response");
	assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_override_grants_access() {
	let mut adapter = MemoryAdapter::default();
	adapter.grant("alice", "admin:plans");
	let router = build_router(adapter);

	let res = router
		.oneshot(authed_get("/api/admin/plan/p1/menus", "alice"))
		.await
		.expect("response");
	assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_entitlement_snapshot_contents() {
	let mut adapter = MemoryAdapter::default();
	adapter.subscribe("alice", "plan-a");
	adapter.plan_permissions.push(PlanPermissionBinding {
		plan_id: "plan-a".into(),
		permission_code: "reports:view".into(),
	});
	adapter.owned_courses.push(("alice".into(), "c2".into()));
	let router = build_router(adapter);

	let res = router
		.oneshot(authed_get("/api/me/entitlements", "alice"))
		.await
		.expect("response");
	assert_eq!(res.status(), StatusCode::OK);

	let body = res.into_body().collect().await.expect("body").to_bytes();
	let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
	let permissions = json["permissions"].as_array().expect("permissions");
	assert!(permissions.iter().any(|p| p == "reports:view"));
	assert!(permissions.iter().any(|p| p == "course:view:c2"));
	assert!(json["computedAt"].as_i64().is_some());
}

#[tokio::test]
async fn test_course_access_gate() {
	let mut adapter = MemoryAdapter::default();
	adapter.owned_courses.push(("alice".into(), "c1".into()));
	let router = build_router(adapter);

	let res = router
		.clone()
		.oneshot(authed_get("/api/course/c1/access", "alice"))
		.await
		.expect("response");
	assert_eq!(res.status(), StatusCode::NO_CONTENT);

	let res = router
		.oneshot(authed_get("/api/course/c9/access", "alice"))
		.await
		.expect("response");
	assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_report_route_is_statically_gated() {
	let router = build_router(MemoryAdapter::default());
	let res = router.oneshot(authed_get("/api/report", "alice")).await.expect("response");
	assert_eq!(res.status(), StatusCode::FORBIDDEN);

	let mut adapter = MemoryAdapter::default();
	adapter.grant("alice", "reports:view");
	let router = build_router(adapter);
	let res = router.oneshot(authed_get("/api/report", "alice")).await.expect("response");
	assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cross_origin_requests_carry_cors_headers() {
	let router = build_router(MemoryAdapter::default());

	let req = Request::builder()
		.uri("/api/me/entitlements")
		.header(header::ORIGIN, "https://app.example.com")
		.body(Body::empty())
		.expect("request");
	let res = router.oneshot(req).await.expect("response");

	// The CORS layer wraps every route, including error responses
	assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
	assert_eq!(
		res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(|v| v.to_str().ok()),
		Some(Some("*"))
	);
}

#[tokio::test]
async fn test_login_and_bad_password() {
	let router = build_router(MemoryAdapter::default());

	let req = Request::builder()
		.method("POST")
		.uri("/api/auth/login")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(r#"{"userId":"alice","password":"secret"}"#))
		.expect("request");
	let res = router.clone().oneshot(req).await.expect("response");
	assert_eq!(res.status(), StatusCode::OK);

	let body = res.into_body().collect().await.expect("body").to_bytes();
	let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
	assert!(json["token"].as_str().is_some());

	let req = Request::builder()
		.method("POST")
		.uri("/api/auth/login")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(r#"{"userId":"alice","password":"wrong"}"#))
		.expect("request");
	let res = router.oneshot(req).await.expect("response");
	assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

// vim: ts=4
