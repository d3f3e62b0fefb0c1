#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use tunobase_api::auth::jwt::{generate_access_token, JwtConfig};
use tunobase_api::config::ServerConfig;
use tunobase_api::router::build_app_router;
use tunobase_api::state::AppState;
use tunobase_db::models::site::Site;
use tunobase_db::models::user::User;
use tunobase_db::repositories::{SiteRepo, UserRepo};
use tunobase_mailer::{Mailer, MailerConfig, MemoryTransport, Renderer};

pub const TEST_DOMAIN: &str = "test.example";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(staging: bool) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        staging,
        site_domain: TEST_DOMAIN.to_string(),
        publish_interval_secs: 60,
        jwt: test_jwt_config(),
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        access_token_expiry_mins: 15,
    }
}

/// A router plus the handles tests inspect afterwards.
pub struct TestApp {
    pub router: Router,
    pub site: Site,
    pub transport: Arc<MemoryTransport>,
}

/// Build the full application router with all middleware layers.
///
/// Mail is enabled and delivered to an in-memory transport.
pub async fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(pool, false).await
}

pub async fn build_test_app_with(pool: PgPool, staging: bool) -> TestApp {
    let config = test_config(staging);
    let site = SiteRepo::get_or_create(&pool, TEST_DOMAIN)
        .await
        .expect("site creation should succeed");

    let transport = Arc::new(MemoryTransport::new());
    let mailer = Mailer::new(
        MailerConfig {
            enabled: true,
            ..MailerConfig::default()
        },
        Renderer::empty(),
        transport.clone(),
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        site: Arc::new(site.clone()),
        mailer: Arc::new(mailer),
    };

    TestApp {
        router: build_app_router(state, &config),
        site,
        transport,
    }
}

/// Create a user with `role` and return it with a valid access token.
pub async fn user_with_token(pool: &PgPool, role: &str) -> (User, String) {
    let user = UserRepo::create(pool, &format!("{role}@example.com"), role, role)
        .await
        .expect("user creation should succeed");
    let token = generate_access_token(user.id, &user.role, &test_jwt_config())
        .expect("token generation should succeed");
    (user, token)
}

/// A token for a role no user row carries, for access checks that never
/// reach the database.
pub fn token_for_role(role: &str) -> String {
    generate_access_token(999_999, role, &test_jwt_config())
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn with_auth(
    builder: axum::http::request::Builder,
    token: Option<&str>,
) -> axum::http::request::Builder {
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    with_auth(Request::builder().method(method).uri(uri), token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    with_auth(Request::builder().method(method).uri(uri), token)
        .body(Body::empty())
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request("GET", uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request("GET", uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, None, &body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("POST", uri, Some(token), &body)).await
}

pub async fn post_raw_auth(app: Router, uri: &str, body: &str, token: &str) -> Response<Body> {
    let request = with_auth(Request::builder().method("POST").uri(uri), Some(token))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request("POST", uri, Some(token))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("PUT", uri, Some(token), &body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request("DELETE", uri, Some(token))).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Assert the status and return the parsed body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
