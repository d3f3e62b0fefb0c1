//! Health endpoint and router fallback.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, TEST_DOMAIN};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_site_and_mode(pool: PgPool) {
    let app = build_test_app(pool).await;

    let response = get(app.router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["site"], TEST_DOMAIN);
    assert_eq!(json["staging"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_returns_json_404(pool: PgPool) {
    let app = build_test_app(pool).await;

    let response = get(app.router, "/api/v1/nothing-here").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_content_kind_is_rejected(pool: PgPool) {
    let app = build_test_app(pool).await;

    let response = get(app.router, "/api/v1/content/podcast").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
