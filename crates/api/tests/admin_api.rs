//! HTTP-level integration tests for admin mail tooling and task triggers.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    build_test_app, expect_json, get_auth, post_auth, post_json_auth, user_with_token,
    TEST_DOMAIN,
};
use serde_json::json;
use sqlx::PgPool;
use tunobase_core::content::ContentKind;
use tunobase_core::state::ContentState;
use tunobase_db::models::content::{CreateContentItem, NewContentItem};
use tunobase_db::repositories::{ContentRepo, VersionRepo};

// ---------------------------------------------------------------------------
// Outbound email
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_test_email_is_sent_and_tracked(pool: PgPool) {
    let (admin, token) = user_with_token(&pool, "admin").await;
    let app = build_test_app(pool).await;

    let response = post_json_auth(
        app.router.clone(),
        "/api/v1/admin/test-email",
        json!({ "to": ["ops@example.com"] }),
        &token,
    )
    .await;
    let data = expect_json(response, StatusCode::OK).await["data"].clone();
    assert_eq!(data["to"], json!(["ops@example.com"]));
    assert_eq!(data["sent"], true);

    let sent = app.transport.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text.contains(TEST_DOMAIN));

    let response = get_auth(app.router, "/api/v1/admin/outbound-emails", &token).await;
    let page = expect_json(response, StatusCode::OK).await["data"].clone();
    let rows = page["object_list"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["to_addresses"], "ops@example.com");
    assert_eq!(rows[0]["user_id"], admin.id);
    assert_eq!(rows[0]["site_id"], app.site.id);
    assert_eq!(page["num_pages"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_test_email_rejects_bad_recipients(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "admin").await;
    let app = build_test_app(pool).await;

    let response = post_json_auth(
        app.router.clone(),
        "/api/v1/admin/test-email",
        json!({ "to": [] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.router,
        "/api/v1/admin/test-email",
        json!({ "to": ["not-an-address"] }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.transport.sent().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_outbound_emails_require_admin(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "editor").await;
    let app = build_test_app(pool).await;

    let response = get_auth(app.router, "/api/v1/admin/outbound-emails", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Scheduled publishing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_publish_objects_publishes_due_items(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "editor").await;
    let app = build_test_app(pool.clone()).await;

    let input = CreateContentItem {
        kind: ContentKind::Content,
        title: "Embargoed".to_string(),
        slug: None,
        state: Some(ContentState::Unpublished),
        publish_at: Some(Utc::now() - Duration::minutes(5)),
        retract_at: None,
        order: None,
        plain_content: None,
        rich_content: None,
        meta_description: None,
        meta_keywords: None,
        image_path: None,
        image_name: None,
        alternative_title: None,
        content_block_parent_id: None,
        site_ids: None,
        series_id: None,
    };
    let new = NewContentItem::resolve(&input, None, None, Utc::now()).unwrap();
    let item = ContentRepo::create(&pool, &new, &[app.site.id], None)
        .await
        .unwrap()
        .unwrap();

    let response = post_auth(app.router.clone(), "/api/v1/tasks/publish-objects", &token).await;
    let data = expect_json(response, StatusCode::OK).await["data"].clone();
    assert_eq!(data["published"], 1);

    let version = VersionRepo::find_by_object(&pool, ContentKind::Content, item.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(version.state, ContentState::Published.id());

    // Nothing left to do on the next pass.
    let response = post_auth(app.router, "/api/v1/tasks/publish-objects", &token).await;
    let data = expect_json(response, StatusCode::OK).await["data"].clone();
    assert_eq!(data["published"], 0);
}
